//! SHA-512 hashing for artifact identity.
//!
//! Every artifact that crosses a machine boundary (download, seed copy,
//! publish) is identified by the lowercase hex SHA-512 of its bytes.

use sha2::{Digest, Sha512};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::Result;

/// Compute the SHA-512 hash of a byte slice.
pub fn sha512(data: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute the SHA-512 hash of a file without loading it into memory.
pub fn sha512_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha512::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha512_known_vector() {
        let hash = sha512(b"hello world");
        assert_eq!(hash.len(), 128); // SHA-512 is 64 bytes = 128 hex chars
        assert_eq!(
            hash,
            "309ecc489c12d6eb4cc40f50c902f2b4d0ed77ee511a7c7a9bcd3ca86d4cd86f\
             989dd35bc5ff499670da34255b45b0cfd830e81f605dcf7dc5542e93ae9cd76f"
        );
    }

    #[test]
    fn test_sha512_empty() {
        assert_eq!(
            sha512(b""),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn test_sha512_file_matches_slice() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("artifact.bin");
        std::fs::write(&path, b"hello world").expect("write file");

        assert_eq!(sha512_file(&path).expect("hash file"), sha512(b"hello world"));
    }
}
