use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobCodecError {
    #[error("KZG error: {0}")]
    Kzg(String),

    #[error("Blob index {index} is out of range, payload has {count} blobs")]
    BlobIndexOutOfRange { index: usize, count: usize },
}

impl From<c_kzg::Error> for BlobCodecError {
    fn from(err: c_kzg::Error) -> Self {
        BlobCodecError::Kzg(format!("{err:?}"))
    }
}
