//! Account addresses.
//!
//! Accounts are identified by a 20-byte address, the same width the
//! custody layer uses for its payees.

/// 20-byte account address.
pub type Address = [u8; 20];

/// Build an address whose first byte is `tag` and the rest zero.
///
/// Handy for tests and fixtures where readable addresses matter more
/// than realistic ones.
pub const fn address_from_tag(tag: u8) -> Address {
    let mut address = [0u8; 20];
    address[0] = tag;
    address
}

/// Short hex prefix (first 4 bytes) used in log lines and error messages.
pub fn short_hex(address: &Address) -> String {
    hex::encode(&address[..4])
}
