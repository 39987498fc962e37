//! Reassembly of chunked asset transfers
//!
//! Assets larger than one frame arrive as a series of `AssetChunk`
//! responses, each naming the total asset length and the offset of its
//! data. The watch requests chunks strictly in order, so every chunk must
//! start where the previous one ended.

/// Reasons a chunk is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssemblyError {
    /// Asset does not fit the destination buffer
    TooLarge,
    /// Chunk does not start where the previous one ended
    OutOfOrder,
    /// Total length differs from the first chunk
    LengthChanged,
    /// Chunk runs past the total length
    Overrun,
    /// Empty chunk before the asset is complete
    EmptyChunk,
}

/// Collects asset chunks into a caller-provided buffer
pub struct AssetAssembler<'a> {
    buf: &'a mut [u8],
    filled: usize,
    total: Option<usize>,
}

impl<'a> AssetAssembler<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            filled: 0,
            total: None,
        }
    }

    /// Offset to request next
    pub fn next_offset(&self) -> u16 {
        self.filled as u16
    }

    /// Accept one chunk
    ///
    /// Returns `Ok(Some(len))` once all `len` bytes are in the buffer and
    /// `Ok(None)` while more chunks are needed.
    pub fn accept(
        &mut self,
        total_len: u16,
        offset: u16,
        data: &[u8],
    ) -> Result<Option<usize>, AssemblyError> {
        let total = total_len as usize;
        match self.total {
            Some(known) if known != total => return Err(AssemblyError::LengthChanged),
            Some(_) => {}
            None => {
                if total > self.buf.len() {
                    return Err(AssemblyError::TooLarge);
                }
                self.total = Some(total);
            }
        }

        if offset as usize != self.filled {
            return Err(AssemblyError::OutOfOrder);
        }
        let end = self.filled + data.len();
        if end > total {
            return Err(AssemblyError::Overrun);
        }
        if data.is_empty() && end < total {
            return Err(AssemblyError::EmptyChunk);
        }

        self.buf[self.filled..end].copy_from_slice(data);
        self.filled = end;

        Ok((end == total).then_some(total))
    }
}
