/// The single capability a [`Token`](crate::Token) needs from the device layer.
///
/// Implementations take care of fragmenting the request into device packets, reassembling the
/// reply, and serializing access to the physical key. A transport is expected to handle one
/// request at a time.
#[cfg_attr(any(test, feature = "testable"), mockall::automock(type Error = std::io::Error;))]
pub trait Transport {
    /// Error reported when the round trip fails, e.g. the device was unplugged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a complete encoded request frame and return the complete reply, status word included.
    fn message(&mut self, request: &[u8]) -> Result<Vec<u8>, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn message(&mut self, request: &[u8]) -> Result<Vec<u8>, Self::Error> {
        (**self).message(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    type Error = T::Error;

    fn message(&mut self, request: &[u8]) -> Result<Vec<u8>, Self::Error> {
        (**self).message(request)
    }
}
