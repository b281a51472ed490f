use bytes::Bytes;

use crate::{stream::{Direction, Stream}, StreamError};

impl<D: Direction> Stream<D> {
    /// Same as [Stream::write], taking and returning [Bytes]
    pub fn write_bytes(&mut self, data: &Bytes, flush: bool) -> Result<Bytes, StreamError> {
        self.write(data, flush).map(Bytes::from)
    }
}
