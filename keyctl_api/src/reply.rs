//! Parsers for the two variable-length kernel reply formats

use key_types::{KeyDescription, KeyPermissions, KeySerial};

/// Width in bytes of one serialized key serial in a keyring's payload.
pub const KEY_SERIAL_WIDTH: usize = std::mem::size_of::<i32>();

/// Decodes a `type;uid;gid;perm;description` describe reply.
///
/// Exactly four delimiter-bounded leading fields must parse (a non-empty
/// type, decimal uid, decimal gid, hexadecimal perm), followed by the
/// free-text tail (which may itself contain semicolons and may be empty).
/// Anything less is a parse failure, never a partial result.
pub fn parse_description(raw: &str) -> Option<KeyDescription> {
    let mut fields = raw.splitn(5, ';');

    let key_type = fields.next()?;
    if key_type.is_empty() {
        return None;
    }
    let uid = fields.next()?.parse::<u32>().ok()?;
    let gid = fields.next()?.parse::<u32>().ok()?;
    let permissions = KeyPermissions::parse_hex(fields.next()?)?;
    // splitn yields a fifth item only when the fourth delimiter is present
    let description = fields.next()?;

    Some(KeyDescription {
        key_type: key_type.to_string(),
        uid,
        gid,
        permissions,
        description: description.to_string(),
    })
}

/// Decodes a keyring's raw member-list reply into key serials.
///
/// The buffer length must be an exact multiple of [`KEY_SERIAL_WIDTH`]; a
/// nonzero remainder is a protocol violation against the kernel interface
/// and rejects the whole buffer rather than truncating.
pub fn parse_key_list(raw: &[u8]) -> Option<Vec<KeySerial>> {
    if raw.len() % KEY_SERIAL_WIDTH != 0 {
        return None;
    }
    Some(
        raw.chunks_exact(KEY_SERIAL_WIDTH)
            .map(|chunk| {
                // chunks_exact guarantees the width
                let mut bytes = [0u8; KEY_SERIAL_WIDTH];
                bytes.copy_from_slice(chunk);
                KeySerial::from_raw(i32::from_ne_bytes(bytes))
            })
            .collect(),
    )
}
