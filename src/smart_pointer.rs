//! A nullable, reference-counted pointer with a hand-rolled, non-atomic count.
//!
//! Unlike [`std::rc::Rc`], the payload and the count live in two separate heap
//! allocations, and a `SmartPointer` may point to nothing at all. There is no weak
//! pointer, so two values that own each other are never freed.

use std::cell::Cell;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::ops::Deref;
use std::ptr::NonNull;

use log::trace;

use crate::AccessError;

/// Shared ownership of a heap allocated `T`, or nothing.
///
/// Cloning a `SmartPointer` aliases the same payload and bumps the shared count.
/// Dropping (or [`release`]-ing) one decrements it, and whichever pointer brings
/// the count to zero frees both the payload and the count.
///
/// The count is a plain [`Cell`], so this type is neither `Send` nor `Sync`.
///
/// [`release`]: Self::release
pub struct SmartPointer<T> {
    inner: Option<Shared<T>>,
    // we own a `T` for the purposes of drop check
    phantom: PhantomData<T>,
}

struct Shared<T> {
    payload: NonNull<T>,
    count: NonNull<Cell<usize>>,
}

impl<T> Copy for Shared<T> {}
impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Shared<T> {
    fn count(&self) -> &Cell<usize> {
        // SAFETY: the count outlives every `SmartPointer` that holds this `Shared`.
        unsafe { self.count.as_ref() }
    }
}

impl<T> SmartPointer<T> {
    /// Moves `value` onto the heap. The new pointer has a count of 1.
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }

    /// Takes ownership of an existing heap allocation.
    pub fn from_box(payload: Box<T>) -> Self {
        let payload = NonNull::from(Box::leak(payload));
        let count = NonNull::from(Box::leak(Box::new(Cell::new(1))));
        trace!("allocated payload {payload:p}");

        Self {
            inner: Some(Shared { payload, count }),
            phantom: PhantomData,
        }
    }

    /// A pointer to nothing. No count is allocated.
    pub const fn null() -> Self {
        Self { inner: None, phantom: PhantomData }
    }

    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// The number of live `SmartPointer`s aliasing this payload, or 0 if null.
    pub fn strong_count(&self) -> usize {
        self.inner.as_ref().map_or(0, |shared| shared.count().get())
    }

    /// Whether both pointers alias the same allocation. Two null pointers compare equal.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        a.inner.map(|shared| shared.payload) == b.inner.map(|shared| shared.payload)
    }

    /// Shared access to the payload.
    pub fn try_deref(&self) -> Result<&T, AccessError> {
        match &self.inner {
            // SAFETY: the count is at least 1 while `self` is alive, so the payload has not been freed,
            //         and nothing hands out `&mut T` unless `self` is the only pointer.
            Some(shared) => Ok(unsafe { shared.payload.as_ref() }),
            None => Err(AccessError::NullPointer),
        }
    }

    /// Exclusive access to the payload, if this is the only pointer to it.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let shared = self.inner.as_mut()?;
        if shared.count().get() != 1 {
            return None
        }
        // SAFETY: no other `SmartPointer` aliases the payload, and we hold `&mut self`.
        Some(unsafe { shared.payload.as_mut() })
    }

    /// Drops this pointer's share of the payload and leaves it null.
    ///
    /// Releasing a null pointer does nothing, so calling this twice is fine.
    pub fn release(&mut self) {
        // NOTE: clear `self` before running the payload's destructor, which may reach back into us.
        let Some(shared) = self.inner.take() else { return };

        let count = shared.count();
        let remaining = count.get() - 1;
        count.set(remaining);

        if remaining < 1 {
            trace!("freeing payload {:p}", shared.payload);
            // SAFETY: both allocations came from `Box::leak` in `from_box`,
            //         and no other `SmartPointer` refers to them anymore.
            unsafe {
                drop(Box::from_raw(shared.count.as_ptr()));
                drop(Box::from_raw(shared.payload.as_ptr()));
            }
        }
    }

    /// Points `self` at whatever `other` points at.
    ///
    /// The old payload is released (and freed if this was its last pointer). Assigning a
    /// pointer to an alias of itself changes nothing.
    pub fn assign(&mut self, other: &Self) -> &mut Self {
        if Self::ptr_eq(self, other) {
            return self
        }

        // take our share of `other` before letting go of the old payload,
        // since dropping it might drop the last other reference to `other`'s payload too
        let acquired = other.clone();
        *self = acquired;
        self
    }

    /// Moves the pointer out, leaving null behind. The count is unchanged.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Moves the payload out if `this` is its only pointer. Otherwise gives `this` back.
    pub fn try_unwrap(mut this: Self) -> Result<T, Self> {
        match this.inner {
            Some(shared) if shared.count().get() == 1 => {
                this.inner = None;
                trace!("unwrapping payload {:p}", shared.payload);
                // SAFETY: same as in `release`, we were the last pointer.
                let value = unsafe {
                    drop(Box::from_raw(shared.count.as_ptr()));
                    *Box::from_raw(shared.payload.as_ptr())
                };
                Ok(value)
            }
            _ => Err(this),
        }
    }
}

impl<T> Clone for SmartPointer<T> {
    fn clone(&self) -> Self {
        if let Some(shared) = &self.inner {
            let count = shared.count();
            if count.get() >= isize::MAX as usize {
                std::process::abort()
            }
            count.set(count.get() + 1);
        }

        Self { inner: self.inner, phantom: PhantomData }
    }
}

impl<T> Drop for SmartPointer<T> {
    fn drop(&mut self) {
        self.release()
    }
}

impl<T> Default for SmartPointer<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Option<Box<T>>> for SmartPointer<T> {
    fn from(payload: Option<Box<T>>) -> Self {
        payload.map_or_else(Self::null, Self::from_box)
    }
}

/// Panics if the pointer is null. Use [`SmartPointer::try_deref`] to check first.
impl<T> Deref for SmartPointer<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        match self.try_deref() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: Debug> Debug for SmartPointer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_deref() {
            Ok(value) => f.debug_tuple("SmartPointer").field(value).finish(),
            Err(_) => f.write_str("SmartPointer(null)"),
        }
    }
}
