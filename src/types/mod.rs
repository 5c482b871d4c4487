// Unsafe undeclared types may contain here

///
/// ### Pascal String
/// Type of ASCII string used by the NE name and import tables.
/// A Pascal string always has a first byte with the whole string length,
/// that is the main difference between it and terminated C-strings.
///
#[derive(Debug, Clone, Default)]
pub struct PascalString {
    length: u8,
    string: Vec<u8>,
}

impl PascalString {
    pub fn empty() -> Self {
        PascalString {
            length: 0,
            string: Vec::new(),
        }
    }

    pub fn new(len: u8, bytes: Vec<u8>) -> Self {
        PascalString {
            length: len,
            string: bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn to_bytes(&self) -> &[u8] {
        self.string.as_slice()
    }
}

impl std::fmt::Display for PascalString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.string))
    }
}
