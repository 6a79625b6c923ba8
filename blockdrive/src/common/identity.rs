use crate::common::constants::ACTOR_ID_LEN;
use crate::utils::hash::sha256_hex;

/// Derives a short actor id from the raw (DER) bytes of a client certificate.
///
/// The id is the first eight hex characters of the certificate's SHA-256 digest.
pub fn actor_id_from_certificate(der: &[u8]) -> String {
    let mut id = sha256_hex(der);
    id.truncate(ACTOR_ID_LEN);
    id
}
