//! Live adapter for anonymous uploads to catbox.moe.

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::expect_success;
use crate::ports::file_host::{FileHost, UploadReceipt, UploadRequest};
use crate::ports::PortFuture;

const CATBOX_API_URL: &str = "https://catbox.moe/user/api.php";

/// Uploads files to catbox.moe without an account.
pub struct Catbox {
    client: Client,
}

impl Catbox {
    /// Create an adapter using the given client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl FileHost for Catbox {
    fn upload(&self, request: &UploadRequest) -> PortFuture<'_, UploadReceipt> {
        let request = request.clone();
        Box::pin(async move {
            let part = Part::bytes(request.data)
                .file_name(request.file_name)
                .mime_str(&request.mime_type)?;
            let form = Form::new().text("reqtype", "fileupload").part("fileToUpload", part);

            let response = self
                .client
                .post(CATBOX_API_URL)
                .multipart(form)
                .timeout(request.timeout)
                .send()
                .await?;
            let body = expect_success(response).await?;
            Ok(UploadReceipt { body })
        })
    }
}
