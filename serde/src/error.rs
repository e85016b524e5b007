use thiserror::Error;

/// Errors that can occur while decoding bytes received from another rank
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran out of bytes in the middle of a value
    #[error("Unexpected end of buffer: needed {needed} more bytes at offset {offset}, buffer holds {len}")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// A tag byte did not name any known variant
    #[error("Invalid {type_name} tag {tag}. The sender and receiver disagree on the record layout")]
    InvalidTag {
        type_name: &'static str,
        tag: u8,
    },
}
