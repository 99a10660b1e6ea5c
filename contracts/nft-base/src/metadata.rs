//! Collection name, symbol and base URI.

use soroban_sdk::{panic_with_error, Bytes, Env, String};

use crate::errors::NonFungibleTokenError;
use crate::storage::{self, NFTStorageKey};

pub const MAX_BASE_URI_LEN: usize = 200;

// u32::MAX has ten decimal digits.
const MAX_DIGITS: usize = 10;

pub fn set_metadata(e: &Env, name: &String, symbol: &String, base_uri: &String) {
    e.storage().instance().set(&NFTStorageKey::Name, name);
    e.storage().instance().set(&NFTStorageKey::Symbol, symbol);
    set_base_uri(e, base_uri);
}

pub fn name(e: &Env) -> String {
    e.storage()
        .instance()
        .get(&NFTStorageKey::Name)
        .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::UnsetMetadata))
}

pub fn symbol(e: &Env) -> String {
    e.storage()
        .instance()
        .get(&NFTStorageKey::Symbol)
        .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::UnsetMetadata))
}

pub fn base_uri(e: &Env) -> String {
    e.storage()
        .instance()
        .get(&NFTStorageKey::URI)
        .unwrap_or_else(|| String::from_str(e, ""))
}

pub fn set_base_uri(e: &Env, uri: &String) {
    if uri.len() as usize > MAX_BASE_URI_LEN {
        panic_with_error!(e, NonFungibleTokenError::BaseUriMaxLenExceeded);
    }
    e.storage().instance().set(&NFTStorageKey::URI, uri);
}

/// Returns the base URI directly followed by the decimal `token_id`, or an
/// empty string when no base URI is set.
///
/// # Panics
///
/// * If the token does not exist.
pub fn token_uri(e: &Env, token_id: u32) -> String {
    storage::owner_of(e, token_id);

    let base = base_uri(e);
    let base_len = base.len() as usize;
    if base_len == 0 {
        return base;
    }

    let digits = u32_to_decimal_bytes(e, token_id);
    let end = base_len + digits.len() as usize;

    let mut buf = [0u8; MAX_BASE_URI_LEN + MAX_DIGITS];
    base.copy_into_slice(&mut buf[..base_len]);
    digits.copy_into_slice(&mut buf[base_len..end]);

    String::from_bytes(e, &buf[..end])
}

pub fn u32_to_decimal_bytes(e: &Env, value: u32) -> Bytes {
    let mut digits = [0u8; MAX_DIGITS];
    let mut start = MAX_DIGITS;
    let mut rest = value;
    loop {
        start -= 1;
        digits[start] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    Bytes::from_slice(e, &digits[start..])
}
