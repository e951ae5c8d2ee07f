use crate::animation::{AnimationTimer, FadeIn};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RevealState {
    Idle,                                             // Background only
    Revealing { fade: FadeIn },                       // Secondary image fading in
    Looping { fade: FadeIn, timer: AnimationTimer },  // Frames cycling over the revealed image
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LoopState {
    Idle,                    // Background only
    Looping(AnimationTimer), // Latched; sprites cycle until the slide is left
}
