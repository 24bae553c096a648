/// Carousel index state for the hero banner
///
/// Navigation wraps in both directions. An empty slideshow has no current
/// slide and ignores every transition.
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct Slideshow {
    len: usize,
    index: usize,
    pub autoplay: bool,
    pub interval: Duration,
}

impl Slideshow {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            autoplay: true,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    pub fn next(&mut self) {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if !self.is_empty() {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump to a slide; out-of-range indices are ignored
    pub fn go_to(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    /// Timer tick: advances only while autoplay is on
    pub fn tick(&mut self) {
        if self.autoplay {
            self.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        let mut show = Slideshow::new(3);
        assert_eq!(show.current(), Some(0));
        show.previous();
        assert_eq!(show.current(), Some(2));
        show.next();
        assert_eq!(show.current(), Some(0));
        show.next();
        show.next();
        show.next();
        assert_eq!(show.current(), Some(0));
    }

    #[test]
    fn test_go_to_ignores_out_of_range() {
        let mut show = Slideshow::new(4);
        show.go_to(2);
        assert_eq!(show.current(), Some(2));
        show.go_to(4);
        assert_eq!(show.current(), Some(2));
    }

    #[test]
    fn test_empty_slideshow_is_inert() {
        let mut show = Slideshow::new(0);
        show.next();
        show.previous();
        show.tick();
        show.go_to(0);
        assert_eq!(show.current(), None);
    }

    #[test]
    fn test_tick_respects_autoplay() {
        let mut show = Slideshow::new(2).with_interval(Duration::from_secs(1));
        assert_eq!(show.interval, Duration::from_secs(1));
        show.tick();
        assert_eq!(show.current(), Some(1));
        show.autoplay = false;
        show.tick();
        assert_eq!(show.current(), Some(1));
    }
}
