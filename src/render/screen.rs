use crate::session::{GameObserver, Snapshot};

/// Latest frame and scores pushed by the session, drawn on the next redraw
#[derive(Debug, Default)]
pub struct Screen {
    frame: Option<Snapshot>,
    score: u32,
    best_score: u32,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Option<&Snapshot> {
        self.frame.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }
}

impl GameObserver for Screen {
    fn render_frame(&mut self, snapshot: &Snapshot) {
        self.frame = Some(snapshot.clone());
    }

    fn report_score(&mut self, score: u32, best_score: u32) {
        self.score = score;
        self.best_score = best_score;
    }
}
