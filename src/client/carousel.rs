use std::time::Duration;

/// Time each hero image stays up
pub const HERO_INTERVAL: Duration = Duration::from_secs(5);

pub const HERO_IMAGES: [&str; 5] = [
    "https://i.ytimg.com/vi/qFhvOB0yoGM/maxresdefault.jpg",
    "https://m.media-amazon.com/images/S/pv-target-images/c203ae23a15b99597c4a2e7475a5085a65e493aa5167279780b73bcfebab8120._UR1920,1080_CLs%7C1920,1080%7C/G/bundle/BottomRightCardGradient16x9.png,/G/01/digital/video/merch/subs/benefit-id/m-r/Prime/logos/channels-logo-white.png%7C0,0,1920,1080+0,0,1920,1080+1578,847,263,156_SX500_FMjpg_.jpg",
    "https://m.media-amazon.com/images/S/pv-target-images/785af8590a7f45e0e39906889941d57a0fd3d911a05b45fee5a8025c2957055d._UR1920,1080_CLs%7C1920,1080%7C/G/bundle/BottomRightCardGradient16x9.png,/G/01/digital/video/merch/subs/benefit-id/m-r/Prime/logos/channels-logo-white.png%7C0,0,1920,1080+0,0,1920,1080+1578,847,263,156_SX500_FMpng_.png",
    "https://m.media-amazon.com/images/S/pv-target-images/0fbd6a006c6ba7fd3d6067c6d9a1e6d5da1dd4831c3ebde18dcb9ccaa2988c14._UR1920,1080_CLs%7C1920,1080%7C/G/bundle/BottomRightCardGradient16x9.png,/G/01/digital/video/merch/subs/benefit-id/m-r/Prime/logos/channels-logo-white.png%7C0,0,1920,1080+0,0,1920,1080+1578,847,263,156_SX500_FMjpg_.jpg",
    "https://m.media-amazon.com/images/S/pv-target-images/8e0d90bcbc47ad1528ed1d1f0b0e88bf31125fa46acf0201fafa3250b40eac._UR1920,1080_CLs%7C1920,1080%7C/G/bundle/BottomRightCardGradient16x9.png,/G/01/digital/video/merch/subs/benefit-id/m-r/Prime/logos/channels-logo-white.png%7C0,0,1920,1080+0,0,1920,1080+1578,847,263,156_SX500_FMpng_.png",
];

/// Decorative hero image rotation, independent of any catalog data
#[derive(Debug, Clone)]
pub struct Carousel {
    images: Vec<String>,
    interval: Duration,
    current: usize,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(HERO_IMAGES.iter().map(|s| s.to_string()).collect(), HERO_INTERVAL)
    }
}

impl Carousel {
    pub fn new(images: Vec<String>, interval: Duration) -> Self {
        Self {
            images,
            interval,
            current: 0,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Image currently shown, `None` for an empty carousel
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    /// Moves to the next image, wrapping after the last
    pub fn advance(&mut self) -> Option<&str> {
        if self.images.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.images.len();
        self.current()
    }

    /// Index shown after `elapsed` time from the first image
    pub fn index_at(&self, elapsed: Duration) -> usize {
        if self.images.is_empty() || self.interval.is_zero() {
            return 0;
        }
        let ticks = elapsed.as_millis() / self.interval.as_millis();
        (ticks % self.images.len() as u128) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_around() {
        let mut carousel = Carousel::default();
        assert_eq!(carousel.current(), Some(HERO_IMAGES[0]));

        for expected in 1..HERO_IMAGES.len() {
            carousel.advance();
            assert_eq!(carousel.current_index(), expected);
        }

        assert_eq!(carousel.advance(), Some(HERO_IMAGES[0]));
    }

    #[test]
    fn test_index_at_follows_interval() {
        let carousel = Carousel::default();

        assert_eq!(carousel.index_at(Duration::from_secs(0)), 0);
        assert_eq!(carousel.index_at(Duration::from_millis(4999)), 0);
        assert_eq!(carousel.index_at(Duration::from_secs(5)), 1);
        assert_eq!(carousel.index_at(Duration::from_secs(24)), 4);
        assert_eq!(carousel.index_at(Duration::from_secs(25)), 0);
    }

    #[test]
    fn test_empty_carousel() {
        let mut carousel = Carousel::new(Vec::new(), HERO_INTERVAL);
        assert_eq!(carousel.current(), None);
        assert_eq!(carousel.advance(), None);
        assert_eq!(carousel.index_at(Duration::from_secs(60)), 0);
    }
}
