bitflags::bitflags! {
    /// Raw held buttons as polled by the host.
    #[repr(transparent)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const LEFT  = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN  = 1 << 2;
        const JUMP  = 1 << 4;
    }
}

bitflags::bitflags! {
    /// One frame of movement intent, as consumed by [`crate::integrate`].
    #[repr(transparent)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Intent: u8 {
        const MOVE_LEFT    = 1 << 0;
        const MOVE_RIGHT   = 1 << 1;
        /// Only on the frame the jump button goes down.
        const JUMP_PRESSED = 1 << 2;
        const JUMP_HELD    = 1 << 3;
        const DROP         = 1 << 4;
    }
}

/// Edge detection from held [`Buttons`] to per-frame [`Intent`].
#[derive(Copy, Clone, Debug, Default)]
pub struct InputLatch {
    jump_was_down: bool,
}

impl InputLatch {
    pub fn intent(&mut self, buttons: Buttons) -> Intent {
        let jump = buttons.contains(Buttons::JUMP);
        let jump_pressed = jump && !self.jump_was_down;
        self.jump_was_down = jump;

        let mut intent = Intent::empty();
        intent.set(Intent::MOVE_LEFT, buttons.contains(Buttons::LEFT));
        intent.set(Intent::MOVE_RIGHT, buttons.contains(Buttons::RIGHT));
        intent.set(Intent::JUMP_PRESSED, jump_pressed);
        intent.set(Intent::JUMP_HELD, jump);
        // Down+Jump asks to drop; the jump press stays set so the combo still
        // jumps when there is nothing to drop through.
        intent.set(Intent::DROP, jump_pressed && buttons.contains(Buttons::DOWN));
        intent
    }

    pub fn reset(&mut self) {
        self.jump_was_down = false;
    }
}
