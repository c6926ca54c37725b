//! GATT identifiers
//!
//! The camera exposes one primary service with one characteristic holding
//! the latest frame (read + notify). The transport collaborator registers
//! these; viewers filter advertisements on [`SERVICE_UUID`].

/// Thermal camera service, 97b8fca2-45a8-478c-9e85-cc852af2e950
pub const SERVICE_UUID: u128 = 0x97b8fca2_45a8_478c_9e85_cc852af2e950;

/// Thermal image characteristic, 52e66cfc-9dd2-4932-8e81-7eaf2c6e2c53
pub const IMAGE_CHARACTERISTIC_UUID: u128 = 0x52e66cfc_9dd2_4932_8e81_7eaf2c6e2c53;

/// Complete local name in advertisements
///
/// Kept short so the 128-bit service UUID still fits the 31-byte payload.
pub const ADVERTISED_NAME: &str = "tc";

/// UUID in the little-endian byte order used on air
pub const fn uuid_le_bytes(uuid: u128) -> [u8; 16] {
    uuid.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_uuid_air_order() {
        let bytes = uuid_le_bytes(SERVICE_UUID);
        assert_eq!(
            bytes,
            [
                0x50, 0xe9, 0xf2, 0x2a, 0x85, 0xcc, 0x85, 0x9e, 0x8c, 0x47, 0xa8, 0x45, 0xa2, 0xfc,
                0xb8, 0x97
            ]
        );
    }

    #[test]
    fn test_characteristic_uuid_air_order() {
        let bytes = uuid_le_bytes(IMAGE_CHARACTERISTIC_UUID);
        assert_eq!(bytes[0], 0x53);
        assert_eq!(bytes[15], 0x52);
    }

    #[test]
    fn test_name_fits_advertisement() {
        // flags (3) + 128-bit uuid list (18) + tx power (3) + name header (2)
        assert!(3 + 18 + 3 + 2 + ADVERTISED_NAME.len() <= 31);
    }
}
