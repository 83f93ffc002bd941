//! End-to-end rule runs over lists and logo trees built in a scratch
//! directory.

use std::path::Path;

use serde_json::json;
use tokenlist_core::TokenListFile;
use tokenlist_rules::{validate_token_list, LogoError, ViolationKind};

const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
const USDT: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0, 0, 0, 0, 0]);
    bytes
}

fn put(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

fn stablecoins(image_dai: &str) -> TokenListFile {
    TokenListFile::from_value(json!({
        "name": "Stablecoins",
        "version": { "major": 1, "minor": 0, "patch": 0 },
        "tags": {
            "stablecoin": { "name": "Stablecoin", "description": "Pegged to a fiat currency" }
        },
        "tokens": [
            {
                "address": USDC, "chainId": 1, "symbol": "USDC", "decimals": 6,
                "name": "USD Coin", "tags": ["stablecoin"],
                "image": format!("./images/1/{USDC}.svg")
            },
            {
                "address": DAI, "chainId": 1, "symbol": "DAI", "decimals": 18,
                "name": "Dai Stablecoin", "tags": ["stablecoin"],
                "image": image_dai
            },
            {
                "address": USDT, "chainId": 1, "symbol": "USDT", "decimals": 6,
                "name": "Tether USD", "tags": ["stablecoin"]
            }
        ]
    }))
    .unwrap()
}

#[test]
fn mixed_formats_pass() {
    let dir = tempfile::tempdir().unwrap();
    put(
        dir.path(),
        &format!("images/1/{USDC}.svg"),
        br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 8 8"><rect width="8" height="8"/></svg>"#,
    );
    put(dir.path(), &format!("images/1/{DAI}.png"), &png(128, 128));

    let list = stablecoins(&format!("images/1/{DAI}.png"));
    let report = validate_token_list(&list, dir.path());
    assert!(report.is_ok(), "{:?}", report.violations);
    assert_eq!(report.tokens_checked, 3);
    assert_eq!(report.logos_checked, 2);
}

#[test]
fn each_broken_token_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    put(
        dir.path(),
        &format!("images/1/{USDC}.svg"),
        br#"<svg onload="x()"></svg>"#,
    );
    put(dir.path(), &format!("images/1/{DAI}.png"), &png(64, 32));

    let list = stablecoins(&format!("images/1/{DAI}.png"));
    let err = validate_token_list(&list, dir.path())
        .into_result()
        .unwrap_err();

    let tokenlist_rules::RuleError::Failed { violations } = &err;
    assert_eq!(violations.len(), 2);
    assert!(matches!(
        &violations[0].kind,
        ViolationKind::Logo(LogoError::Svg { .. })
    ));
    assert!(matches!(
        &violations[1].kind,
        ViolationKind::Logo(LogoError::NotSquare { width: 64, height: 32, .. })
    ));
    let msg = err.to_string();
    assert!(msg.starts_with("2 domain rule violation(s):"));
    assert!(msg.contains("tokens[1] DAI"));
}

#[test]
fn oversized_png_rejected() {
    let dir = tempfile::tempdir().unwrap();
    put(
        dir.path(),
        &format!("images/1/{USDC}.svg"),
        b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>",
    );
    let mut big = png(512, 512);
    big.resize(51 * 1024, 0);
    put(dir.path(), &format!("images/1/{DAI}.png"), &big);

    let list = stablecoins(&format!("images/1/{DAI}.png"));
    let report = validate_token_list(&list, dir.path());
    assert_eq!(report.violations.len(), 1);
    assert!(report.violations[0].to_string().contains("exceeds 50 KiB"));
}
