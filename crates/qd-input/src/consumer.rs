//! Disposable bundles of input subscriptions.

use crate::input::DrawerInput;
use crate::signal::OwnerToken;

/// A named bundle of subscriptions against one [`DrawerInput`], plus any
/// extra teardown work, disposed through a single handle.
///
/// The registration callback runs synchronously during construction;
/// subscribe through [`Consumer::owner`] so disposal revokes everything at
/// once. Disposal is idempotent, runs deferred cleanups in reverse
/// registration order, and also happens on drop.
pub struct Consumer {
    name: String,
    owner: OwnerToken,
    cleanups: Vec<Box<dyn FnOnce()>>,
    disposed: bool,
}

impl Consumer {
    pub fn new(
        name: impl Into<String>,
        input: &mut DrawerInput,
        register: impl FnOnce(&mut Consumer, &mut DrawerInput),
    ) -> Self {
        let mut consumer = Self {
            name: name.into(),
            owner: OwnerToken::new(),
            cleanups: Vec::new(),
            disposed: false,
        };
        register(&mut consumer, input);
        consumer
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owner token to subscribe signals under.
    pub fn owner(&self) -> &OwnerToken {
        &self.owner
    }

    /// Registers extra teardown work to run on disposal.
    pub fn defer(&mut self, cleanup: impl FnOnce() + 'static) {
        self.cleanups.push(Box::new(cleanup));
    }

    /// Revokes every subscription made under this consumer's owner — no
    /// further emitter fan-out reaches it, even mid-dispatch — and runs the
    /// deferred cleanups. Safe to call repeatedly, and safe when nothing
    /// was ever registered.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.owner.revoke();
        for cleanup in self.cleanups.drain(..).rev() {
            cleanup();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for Consumer {
    fn drop(&mut self) {
        self.dispose();
    }
}
