// src/services/document_opener.rs
//
// Como o PDF do recibo chega à impressora depende do navegador do cliente.
// No macOS a impressão vai por um iframe oculto; nos demais, por uma janela nova,
// com download como saída quando o pop-up é bloqueado.

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};

pub const PRINT_MODE_HEADER: HeaderName = HeaderName::from_static("x-print-mode");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPlatform {
    MacOs,
    Other,
}

impl ClientPlatform {
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if ua.contains("Macintosh") || ua.contains("Mac OS X") => ClientPlatform::MacOs,
            _ => ClientPlatform::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    HiddenFrame,
    NewWindow,
    Download,
}

impl PrintMode {
    fn as_str(&self) -> &'static str {
        match self {
            PrintMode::HiddenFrame => "hidden-frame",
            PrintMode::NewWindow => "new-window",
            PrintMode::Download => "download",
        }
    }
}

pub struct PrintDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PrintDocument {
    /// `recibo_<id>.pdf`, com o id reduzido a `[A-Za-z0-9_-]` para caber no Content-Disposition.
    pub fn receipt(installment_id: &str, bytes: Vec<u8>) -> Self {
        let safe_id: String = installment_id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        let filename = if safe_id.is_empty() {
            "recibo.pdf".to_string()
        } else {
            format!("recibo_{}.pdf", safe_id)
        };
        Self { filename, bytes }
    }
}

#[derive(Debug)]
pub struct OpenedDocument {
    pub mode: PrintMode,
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub trait DocumentOpener: Send + Sync {
    fn open(&self, document: PrintDocument, popup_blocked: bool) -> OpenedDocument;
}

pub struct HiddenFrameOpener;

impl DocumentOpener for HiddenFrameOpener {
    // O iframe oculto não depende de pop-ups
    fn open(&self, document: PrintDocument, _popup_blocked: bool) -> OpenedDocument {
        OpenedDocument { mode: PrintMode::HiddenFrame, filename: document.filename, bytes: document.bytes }
    }
}

pub struct NewWindowOpener;

impl DocumentOpener for NewWindowOpener {
    fn open(&self, document: PrintDocument, popup_blocked: bool) -> OpenedDocument {
        let mode = if popup_blocked { PrintMode::Download } else { PrintMode::NewWindow };
        OpenedDocument { mode, filename: document.filename, bytes: document.bytes }
    }
}

pub fn opener_for(platform: ClientPlatform) -> &'static dyn DocumentOpener {
    match platform {
        ClientPlatform::MacOs => &HiddenFrameOpener,
        ClientPlatform::Other => &NewWindowOpener,
    }
}

impl IntoResponse for OpenedDocument {
    fn into_response(self) -> Response {
        let disposition = match self.mode {
            PrintMode::Download => "attachment",
            PrintMode::HiddenFrame | PrintMode::NewWindow => "inline",
        };
        let content_disposition = HeaderValue::from_str(&format!("{}; filename=\"{}\"", disposition, self.filename))
            .unwrap_or_else(|_| HeaderValue::from_static("inline"));

        (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
                (header::CONTENT_DISPOSITION, content_disposition),
                (PRINT_MODE_HEADER, HeaderValue::from_static(self.mode.as_str())),
            ],
            self.bytes,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> PrintDocument {
        PrintDocument { filename: "recibo_1.pdf".into(), bytes: b"%PDF".to_vec() }
    }

    #[test]
    fn mac_user_agents_use_the_hidden_frame() {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
        assert_eq!(ClientPlatform::from_user_agent(Some(ua)), ClientPlatform::MacOs);
        let opened = opener_for(ClientPlatform::MacOs).open(doc(), true);
        assert_eq!(opened.mode, PrintMode::HiddenFrame);
    }

    #[test]
    fn blocked_popup_degrades_to_download() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
        let platform = ClientPlatform::from_user_agent(Some(ua));
        assert_eq!(platform, ClientPlatform::Other);
        assert_eq!(opener_for(platform).open(doc(), false).mode, PrintMode::NewWindow);
        assert_eq!(opener_for(platform).open(doc(), true).mode, PrintMode::Download);
    }

    #[test]
    fn receipt_filename_drops_header_breaking_characters() {
        let document = PrintDocument::receipt("12\"; filename=evil.exe", Vec::new());
        assert_eq!(document.filename, "recibo_12filenameevilexe.pdf");
        assert_eq!(PrintDocument::receipt("cuota-7_b", Vec::new()).filename, "recibo_cuota-7_b.pdf");
        assert_eq!(PrintDocument::receipt("\"\"", Vec::new()).filename, "recibo.pdf");

        let response = NewWindowOpener.open(PrintDocument::receipt("9;x", b"%PDF".to_vec()), true).into_response();
        assert_eq!(response.headers()[header::CONTENT_DISPOSITION], "attachment; filename=\"recibo_9x.pdf\"");
    }

    #[test]
    fn download_is_served_as_attachment() {
        let response = NewWindowOpener.open(doc(), true).into_response();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_DISPOSITION], "attachment; filename=\"recibo_1.pdf\"");
        assert_eq!(headers[PRINT_MODE_HEADER], "download");
    }
}
