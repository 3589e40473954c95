//! Reading Sink
//!
//! Destination for decoded readings. Persistence, display and any
//! observability of successful decodes are the sink's business; the decoder
//! only hands readings over.

use crate::reading::Reading;

/// Consumer of decoded readings
///
/// ## Implementation Notes
///
/// - `emit` is called once per decoded frame, in decode order
/// - An error is reported to the caller but must leave the sink usable for
///   the next reading; a transient write failure should not stop decoding
pub trait ReadingSink {
    /// Error raised when a reading cannot be delivered
    type Error;

    /// Deliver one reading
    fn emit(&mut self, reading: &Reading) -> Result<(), Self::Error>;
}

impl<S: ReadingSink + ?Sized> ReadingSink for &mut S {
    type Error = S::Error;

    fn emit(&mut self, reading: &Reading) -> Result<(), Self::Error> {
        (**self).emit(reading)
    }
}

#[cfg(feature = "std")]
impl ReadingSink for Vec<Reading> {
    type Error = core::convert::Infallible;

    fn emit(&mut self, reading: &Reading) -> Result<(), Self::Error> {
        self.push(*reading);
        Ok(())
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn deliver<S: ReadingSink>(mut sink: S, reading: Reading) -> Result<(), S::Error> {
        sink.emit(&reading)
    }

    #[test]
    fn vec_collects_in_order() {
        let mut readings: Vec<Reading> = Vec::new();
        deliver(&mut readings, Reading::new(266, 90)).unwrap();
        deliver(&mut readings, Reading::new(-12, 40)).unwrap();
        assert_eq!(readings, vec![Reading::new(266, 90), Reading::new(-12, 40)]);
    }
}
