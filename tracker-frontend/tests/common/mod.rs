#![allow(dead_code)]

use tracker_core::config::TelemetrySettings;
use tracker_frontend::config::{ApiSettings, ServerSettings, Settings};
use tracker_frontend::startup::Application;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub documents_api: MockServer,
    /// Does not follow redirects, so a redirect's follow-up GET never
    /// shows up in the mock's request log.
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let documents_api = MockServer::start().await;

        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            api: ApiSettings {
                base_url: documents_api.uri(),
            },
            telemetry: TelemetrySettings::default(),
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            address: format!("http://127.0.0.1:{}", port),
            port,
            documents_api,
            client,
        }
    }

    pub async fn get_index(&self) -> reqwest::Response {
        self.client
            .get(&self.address)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_upload(&self, form: reqwest::multipart::Form) -> reqwest::Response {
        self.client
            .post(format!("{}/upload", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_delete(&self, id: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/documents/{}/delete", self.address, id))
            .form(&[("confirmed", "true")])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Requests the documents API received for `method`, e.g. `GET`.
    pub async fn api_requests(&self, method: &str) -> usize {
        self.documents_api
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.to_string() == method)
            .count()
    }
}

pub fn file_form(
    name: &str,
    content_type: &str,
    bytes: Vec<u8>,
    expiry_date: &str,
) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(name.to_string())
        .mime_str(content_type)
        .expect("valid content type");
    reqwest::multipart::Form::new()
        .part("file", part)
        .text("expiry_date", expiry_date.to_string())
}
