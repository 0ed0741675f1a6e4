//! Background scroll lock shared by the mobile nav and the lightbox.
//!
//! The body is pinned with `position: fixed` at the negative scroll
//! position so iOS cannot scroll it behind an overlay, then restored to the
//! exact same position when the last holder releases it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;

use crate::dom;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LockState {
    holders: u32,
    saved_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LockChange {
    Pin { y: f64 },
    Restore { y: f64 },
    None,
}

impl LockState {
    #[cfg(test)]
    pub fn is_locked(&self) -> bool {
        self.holders > 0
    }

    pub fn acquire(&mut self, current_y: f64) -> LockChange {
        self.holders += 1;
        if self.holders == 1 {
            self.saved_y = current_y;
            LockChange::Pin { y: current_y }
        } else {
            LockChange::None
        }
    }

    pub fn release(&mut self) -> LockChange {
        match self.holders {
            0 => LockChange::None,
            1 => {
                self.holders = 0;
                LockChange::Restore { y: self.saved_y }
            }
            _ => {
                self.holders -= 1;
                LockChange::None
            }
        }
    }
}

/// One holder's handle on the page-wide lock. Lock and unlock are idempotent
/// per handle.
#[derive(Clone)]
pub struct ScrollLock {
    shared: Rc<RefCell<LockState>>,
    held: Rc<RefCell<bool>>,
}

impl PartialEq for ScrollLock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared) && Rc::ptr_eq(&self.held, &other.held)
    }
}

impl ScrollLock {
    pub fn shared() -> Rc<RefCell<LockState>> {
        Rc::new(RefCell::new(LockState::default()))
    }

    pub fn handle(shared: &Rc<RefCell<LockState>>) -> Self {
        Self {
            shared: shared.clone(),
            held: Rc::new(RefCell::new(false)),
        }
    }

    pub fn lock(&self) {
        if self.held.replace(true) {
            return;
        }
        let change = self.shared.borrow_mut().acquire(dom::scroll_y());
        if let Err(e) = apply(change) {
            log::warn!("Failed to lock scroll: {:?}", e);
        }
    }

    pub fn unlock(&self) {
        if !self.held.replace(false) {
            return;
        }
        let change = self.shared.borrow_mut().release();
        if let Err(e) = apply(change) {
            log::warn!("Failed to unlock scroll: {:?}", e);
        }
    }

    pub fn set(&self, locked: bool) {
        if locked {
            self.lock()
        } else {
            self.unlock()
        }
    }
}

fn apply(change: LockChange) -> Result<(), JsValue> {
    let Some(body) = dom::document().and_then(|d| d.body()) else {
        return Ok(());
    };
    let style = body.style();
    match change {
        LockChange::Pin { y } => {
            style.set_property("position", "fixed")?;
            style.set_property("top", &format!("-{}px", y))?;
            style.set_property("left", "0")?;
            style.set_property("right", "0")?;
            style.set_property("width", "100%")?;
        }
        LockChange::Restore { y } => {
            for prop in ["position", "top", "left", "right", "width"] {
                style.remove_property(prop)?;
            }
            if let Some(window) = dom::window() {
                window.scroll_to_with_x_and_y(0.0, y);
            }
        }
        LockChange::None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_holder_pins_last_restores() {
        let mut s = LockState::default();
        assert_eq!(s.acquire(420.0), LockChange::Pin { y: 420.0 });
        assert_eq!(s.acquire(0.0), LockChange::None);
        assert_eq!(s.release(), LockChange::None);
        assert!(s.is_locked());
        assert_eq!(s.release(), LockChange::Restore { y: 420.0 });
        assert!(!s.is_locked());
    }

    #[test]
    fn release_when_unlocked_is_noop() {
        let mut s = LockState::default();
        assert_eq!(s.release(), LockChange::None);
        assert!(!s.is_locked());
    }
}
