use alloy::{
    primitives::{hex, keccak256, Address, Signature},
    signers::{local::PrivateKeySigner, SignerSync},
};

/// The header carrying the relay authentication token.
pub const SIGNATURE_HEADER: &str = "X-Flashbots-Signature";

/// Signs relay request bodies.
///
/// The token has the form `address:signature`. The signature is an EIP-191
/// personal-message signature over the `0x`-prefixed hex string of the
/// body's keccak hash. The relay verifies exactly this, so the hash is
/// signed as text rather than as raw bytes.
///
/// The signing key only identifies the searcher to the relay and builds
/// reputation. It need not hold funds.
#[derive(Debug, Clone)]
pub struct RelaySigner {
    signer: PrivateKeySigner,
}

impl From<PrivateKeySigner> for RelaySigner {
    fn from(signer: PrivateKeySigner) -> Self {
        Self::new(signer)
    }
}

impl RelaySigner {
    /// Wrap a local signer.
    pub const fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// The address the relay will see requests from.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The message actually signed for `body`.
    fn message(body: &[u8]) -> String {
        hex::encode_prefixed(keccak256(body))
    }

    /// Produce the authentication token for a serialized request body.
    pub fn sign(&self, body: &[u8]) -> Result<String, alloy::signers::Error> {
        let signature = self.signer.sign_message_sync(Self::message(body).as_bytes())?;
        Ok(format!("{}:{}", self.address(), hex::encode_prefixed(signature.as_bytes())))
    }

    /// Check an authentication token against a body, returning the
    /// authenticated address. Returns `None` if the token is malformed or
    /// the signature does not recover to the claimed address.
    pub fn verify(body: &[u8], token: &str) -> Option<Address> {
        let (address, signature) = token.split_once(':')?;
        let address: Address = address.parse().ok()?;
        let signature = Signature::try_from(hex::decode(signature).ok()?.as_slice()).ok()?;

        let recovered = signature.recover_address_from_msg(Self::message(body)).ok()?;
        (recovered == address).then_some(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn signer() -> RelaySigner {
        RelaySigner::new(KEY.parse().unwrap())
    }

    #[test]
    fn token_shape() {
        let token = signer().sign(br#"{"jsonrpc":"2.0"}"#).unwrap();
        let (address, signature) = token.split_once(':').unwrap();
        assert_eq!(address, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert!(signature.starts_with("0x"));
        // 65 bytes, hex encoded
        assert_eq!(signature.len(), 2 + 130);
    }

    #[test]
    fn signing_is_deterministic() {
        let body = br#"{"method":"eth_sendBundle"}"#;
        assert_eq!(signer().sign(body).unwrap(), signer().sign(body).unwrap());
    }

    #[test]
    fn signs_hex_hash_as_text() {
        let body = b"hello";
        let token = signer().sign(body).unwrap();
        let (_, signature) = token.split_once(':').unwrap();
        let signature =
            Signature::try_from(hex::decode(signature).unwrap().as_slice()).unwrap();

        // Recovering over the raw hash bytes must not yield the signer.
        let raw = signature.recover_address_from_msg(keccak256(body)).unwrap();
        assert_ne!(raw, signer().address());

        let text = signature.recover_address_from_msg(hex::encode_prefixed(keccak256(body)));
        assert_eq!(text.unwrap(), signer().address());
    }

    #[test]
    fn tampered_body_is_rejected() {
        let token = signer().sign(b"original").unwrap();
        assert_eq!(RelaySigner::verify(b"original", &token), Some(signer().address()));
        assert_eq!(RelaySigner::verify(b"tampered", &token), None);
        assert_eq!(RelaySigner::verify(b"original", "garbage"), None);
    }

    proptest! {
        #[test]
        fn sign_then_verify(body in proptest::collection::vec(any::<u8>(), 0..512)) {
            let signer = signer();
            let token = signer.sign(&body).unwrap();
            prop_assert_eq!(RelaySigner::verify(&body, &token), Some(signer.address()));
        }
    }
}
