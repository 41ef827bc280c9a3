//! Request and response bodies for the HTTP API

pub mod request;
pub mod response;

pub use request::FilenameRequest;
pub use response::{
    ArgumentsResponse, FileListResponse, GenerateResponse, UploadResponse,
};
