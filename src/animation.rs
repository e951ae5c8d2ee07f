/// Looping frame selection driven by the pushed clock.
///
/// The frame index is `floor(((now - start) mod (count * duration)) / duration)`,
/// so the sequence cycles `0..frame_count` forever once started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTimer {
    start: f64,
    frame_duration: f64,
    frame_count: usize,
}

impl AnimationTimer {
    pub fn new(start: f64, frame_duration: f64, frame_count: usize) -> Self {
        Self { start, frame_duration, frame_count }
    }

    pub fn frame(&self, now: f64) -> usize {
        if self.frame_count == 0 || self.frame_duration <= 0.0 {
            return 0;
        }
        let elapsed = (now - self.start).max(0.0);
        let cycle = self.frame_duration * self.frame_count as f64;
        let index = (elapsed.rem_euclid(cycle) / self.frame_duration).floor() as usize;
        index.min(self.frame_count - 1)
    }
}

/// Linear alpha ramp from transparent to opaque, held once complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeIn {
    start: f64,
    duration: f64,
}

impl FadeIn {
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    pub fn alpha(&self, now: f64) -> u8 {
        if self.duration <= 0.0 {
            return 255;
        }
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0);
        (t * 255.0).round() as u8
    }
}
