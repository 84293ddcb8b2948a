#![warn(missing_docs)]
#![doc = r#"
Decoder for SPLICE drum machine patterns

A `.splice` file holds a single [`Pattern`](prelude::Pattern): the hardware
version it was saved with, a tempo, and a list of tracks, each with sixteen
on/off steps.

# Example
```rust,no_run
let pattern = splice::decode_file("pattern_1.splice").unwrap();

// Saved with HW Version: 0.808-alpha
// Tempo: 120
// (0) kick	|x---|x---|x---|x---|
print!("{pattern}");
```

Decoding is all or nothing: either the whole pattern is returned or a
[`ReaderError`](reader::ReaderError) says where and why it failed.
"#]

mod error;
pub use error::*;

pub mod file;

pub mod reader;

use std::{fs::File, io::BufReader, path::Path};

use crate::{
    file::Pattern,
    reader::{ReadResult, ReaderError},
};

/// Decodes the SPLICE file found at `path`.
///
/// The file is closed before this returns, whether decoding succeeded or not.
pub fn decode_file(path: impl AsRef<Path>) -> ReadResult<Pattern> {
    let file = File::open(path).map_err(|e| ReaderError::io(0, e))?;
    Pattern::decode(BufReader::new(file))
}

/// Commonly used types
pub mod prelude {
    pub use crate::FieldError;
    pub use crate::decode_file;
    pub use crate::file::*;
    pub use crate::reader::{Field, ReadResult, ReaderError, ReaderErrorKind};
}
