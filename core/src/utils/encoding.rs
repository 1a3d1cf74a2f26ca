use base64::{engine::general_purpose, Engine};

/// Base64 encode data using the STANDARD engine (alphabet along with "+" and "/")
pub(crate) fn base64_encode_standard(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

#[cfg(test)]
mod tests {
    use crate::utils::encoding::base64_encode_standard;

    #[test]
    fn test_base64_encode_standard() {
        let test = b"[output]\nname = \"shortcuts\"";
        let result = base64_encode_standard(test);
        assert_eq!(result, "W291dHB1dF0KbmFtZSA9ICJzaG9ydGN1dHMi");
    }

    #[test]
    fn test_base64_encode_empty() {
        assert_eq!(base64_encode_standard(&[]), "");
    }
}
