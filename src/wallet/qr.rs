//! Terminal QR codes for sign URLs.

use qrcode::render::unicode;
use qrcode::QrCode;

use crate::wallet::error::{WalletError, WalletResult};

/// Render `data` with Unicode half-block characters, two modules per row.
pub fn render_terminal(data: &str) -> WalletResult<String> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| WalletError::Qr(e.to_string()))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_square_block() {
        let out = render_terminal("https://xumm.app/sign/0e6e5c3a").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.len() > 10);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }
}
