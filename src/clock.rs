//! Monotonic time source used for motion read deadlines.

/// Monotonic millisecond counter.
///
/// The epoch is arbitrary; only differences between two readings are used. Wrapping is
/// tolerated.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary fixed point.
    fn now_ms(&mut self) -> u64;
}

impl<T> Clock for &mut T
where
    T: Clock + ?Sized,
{
    fn now_ms(&mut self) -> u64 {
        T::now_ms(self)
    }
}
