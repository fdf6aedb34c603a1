//! Spin feedback sound using the Web Audio API
//!
//! A single procedurally generated whoosh: a sine sweep that rises while the
//! wheel spins and ramps out when it stops. Purely cosmetic: every failure
//! (blocked autoplay, no secure context) is swallowed and the draw engine is
//! never gated on it.

use crate::theme::SpinTone;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Fire-and-forget spin sound. `start` and `stop` report nothing back.
#[derive(Default)]
pub struct SpinSound {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    #[cfg(target_arch = "wasm32")]
    playing: Option<(OscillatorNode, GainNode)>,
}

#[cfg(target_arch = "wasm32")]
impl SpinSound {
    pub fn new() -> Self {
        // May fail outside a secure context; the feature just stays off.
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - spin sound disabled");
        }
        Self { ctx, playing: None }
    }

    /// Begin the whoosh. Replaces any sound already playing.
    pub fn start(&mut self, tone: SpinTone) {
        self.stop();
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture.
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };
        let t = ctx.current_time();

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value_at_time(tone.start_hz, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(tone.peak_hz, t + tone.sweep_secs)
            .ok();

        gain.gain().set_value_at_time(0.0001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.6, t + 0.15)
            .ok();

        if osc.connect_with_audio_node(&gain).is_err() {
            return;
        }
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        if osc.start().is_err() {
            return;
        }

        self.playing = Some((osc, gain));
    }

    /// Ramp the sound out. Harmless when nothing is playing.
    pub fn stop(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = self.playing.take() else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().cancel_scheduled_values(t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.25)
            .ok();
        osc.stop_with_when(t + 0.3).ok();
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
impl SpinSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, _tone: SpinTone) {}

    pub fn stop(&mut self) {}
}
