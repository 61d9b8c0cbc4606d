use macroquad::audio::{play_sound_once, Sound};

use crate::model::GameEvent;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cue {
    Start,
    Elimination,
}

// 事件对应的提示音，结算事件不发声
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::Started => Some(Cue::Start),
        GameEvent::Eliminated { .. } => Some(Cue::Elimination),
        GameEvent::Finished { .. } => None,
    }
}

#[derive(Default)]
pub struct Sfx {
    pub elimination: Option<Sound>,
    pub start: Option<Sound>,
}

impl Sfx {
    fn sound(&self, cue: Cue) -> Option<&Sound> {
        match cue {
            Cue::Start => self.start.as_ref(),
            Cue::Elimination => self.elimination.as_ref(),
        }
    }

    // 每个事件最多播放一次
    pub fn play(&self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(cue_for) {
            if let Some(sound) = self.sound(cue) {
                play_sound_once(sound);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, EliminationCause, PlayerColor, PlayerId};

    #[test]
    fn test_cues_follow_events() {
        let events = [
            GameEvent::Started,
            GameEvent::Eliminated {
                player: PlayerId(2),
                color: PlayerColor::Green,
                cause: EliminationCause::Boundary(Edge::Bottom),
            },
            GameEvent::Finished {
                winner: Some(PlayerColor::Black),
            },
        ];
        let cues: Vec<Cue> = events.iter().filter_map(cue_for).collect();
        assert_eq!(cues, vec![Cue::Start, Cue::Elimination]);
    }
}
