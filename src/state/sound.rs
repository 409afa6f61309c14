//! Sound cue routing.
//!
//! Playback itself lives outside this crate behind [`SoundPlayer`]. The board
//! routes each cue to one of two channels and stops whatever the channel is
//! playing before starting the new source, so a channel never has more than
//! one active playback.

use super::symbol::Symbol;

/// Playback capability supplied by the host.
pub trait SoundPlayer {
    /// Start playing a source. Called only after `stop`.
    fn play(&mut self, source: &str);

    /// Stop the current playback, if any.
    fn stop(&mut self);
}

/// Player that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, _source: &str) {}

    fn stop(&mut self) {}
}

/// Playback channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundChannel {
    /// Spin and reel-stop sounds
    Effects,
    /// Reach and win sounds
    Fanfare,
}

/// Something worth a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Spin,
    ReelStop,
    Reach,
    Win(Symbol),
}

impl SoundCue {
    /// Get the channel this cue plays on.
    pub fn channel(&self) -> SoundChannel {
        match self {
            Self::Spin | Self::ReelStop => SoundChannel::Effects,
            Self::Reach | Self::Win(_) => SoundChannel::Fanfare,
        }
    }

    /// Get the sound source for this cue.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Spin => "/sounds/spin.wav",
            Self::ReelStop => "/sounds/stop.mp3",
            Self::Reach => "/sounds/reach.mp3",
            Self::Win(Symbol::Seven) => "/sounds/win2.mp3",
            Self::Win(_) => "/sounds/win1.mp3",
        }
    }
}

/// Two-channel cue router.
pub struct SoundBoard {
    effects: Box<dyn SoundPlayer>,
    fanfare: Box<dyn SoundPlayer>,
}

impl Default for SoundBoard {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for SoundBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBoard").finish_non_exhaustive()
    }
}

impl SoundBoard {
    /// Create a board over two channel players.
    pub fn new(effects: Box<dyn SoundPlayer>, fanfare: Box<dyn SoundPlayer>) -> Self {
        Self { effects, fanfare }
    }

    /// Create a board that plays nothing.
    pub fn silent() -> Self {
        Self::new(Box::new(SilentPlayer), Box::new(SilentPlayer))
    }

    fn player(&mut self, channel: SoundChannel) -> &mut dyn SoundPlayer {
        match channel {
            SoundChannel::Effects => self.effects.as_mut(),
            SoundChannel::Fanfare => self.fanfare.as_mut(),
        }
    }

    /// Play a cue on its channel, replacing what was playing there.
    pub fn cue(&mut self, cue: SoundCue) {
        let player = self.player(cue.channel());
        player.stop();
        player.play(cue.source());
    }

    /// Silence one channel.
    pub fn stop(&mut self, channel: SoundChannel) {
        self.player(channel).stop();
    }

    /// Silence both channels.
    pub fn stop_all(&mut self) {
        self.effects.stop();
        self.fanfare.stop();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingPlayer;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cue_channels() {
        assert_eq!(SoundCue::Spin.channel(), SoundChannel::Effects);
        assert_eq!(SoundCue::ReelStop.channel(), SoundChannel::Effects);
        assert_eq!(SoundCue::Reach.channel(), SoundChannel::Fanfare);
        assert_eq!(SoundCue::Win(Symbol::Bell).channel(), SoundChannel::Fanfare);
    }

    #[test]
    fn test_win_sources() {
        assert_eq!(SoundCue::Win(Symbol::Seven).source(), "/sounds/win2.mp3");
        assert_eq!(SoundCue::Win(Symbol::Cherry).source(), "/sounds/win1.mp3");
    }

    #[test]
    fn test_stop_before_play() {
        let effects = RecordingPlayer::default();
        let fanfare = RecordingPlayer::default();
        let mut board = SoundBoard::new(Box::new(effects.clone()), Box::new(fanfare.clone()));

        board.cue(SoundCue::Spin);
        board.cue(SoundCue::ReelStop);
        board.cue(SoundCue::Win(Symbol::Lemon));

        assert_eq!(
            effects.calls(),
            vec![
                "stop".to_string(),
                "play:/sounds/spin.wav".to_string(),
                "stop".to_string(),
                "play:/sounds/stop.mp3".to_string(),
            ]
        );
        assert_eq!(fanfare.played(), vec!["/sounds/win1.mp3".to_string()]);
    }

    #[test]
    fn test_stop_all() {
        let effects = RecordingPlayer::default();
        let fanfare = RecordingPlayer::default();
        let mut board = SoundBoard::new(Box::new(effects.clone()), Box::new(fanfare.clone()));

        board.stop_all();
        assert_eq!(effects.calls(), vec!["stop".to_string()]);
        assert_eq!(fanfare.calls(), vec!["stop".to_string()]);
    }
}
