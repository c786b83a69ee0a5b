//! Minimal AWS Signature v4 signing for S3 requests rust-s3 does not cover.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

/// Headers to attach to a signed request
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub payload_hash: String,
    pub authorization: String,
}

/// Credentials and scope used to sign requests
pub struct Signer<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub region: &'a str,
}

impl Signer<'_> {
    /// Sign an S3 request with the host, content hash and date headers
    pub fn sign(
        &self,
        method: &str,
        host: &str,
        canonical_uri: &str,
        canonical_query: &str,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> Result<SignedHeaders, AppError> {
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let payload_hash = hex::encode(Sha256::digest(payload));

        let canonical_headers = format!(
            "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
            host, payload_hash, amz_date
        );
        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            method, canonical_uri, canonical_query, canonical_headers, SIGNED_HEADERS, payload_hash
        );

        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            credential_scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signature = self.signature(&date_stamp, &string_to_sign)?;
        let authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, self.access_key, credential_scope, SIGNED_HEADERS, signature
        );

        Ok(SignedHeaders {
            amz_date,
            payload_hash,
            authorization,
        })
    }

    fn signature(&self, date_stamp: &str, string_to_sign: &str) -> Result<String, AppError> {
        let k_date = hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, b"s3")?;
        let k_signing = hmac_sha256(&k_service, b"aws4_request")?;

        Ok(hex::encode(hmac_sha256(
            &k_signing,
            string_to_sign.as_bytes(),
        )?))
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signer(secret: &str) -> Signer<'_> {
        Signer {
            access_key: "minioadmin",
            secret_key: secret,
            region: "us-east-1",
        }
    }

    #[test]
    fn test_sign_builds_authorization_header() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let signed = signer("minioadmin")
            .sign("PUT", "localhost:9000", "/kguardian", "policy=", b"{}", now)
            .unwrap();

        assert_eq!(signed.amz_date, "20250301T123000Z");
        assert_eq!(signed.payload_hash, hex::encode(Sha256::digest(b"{}")));
        assert!(signed.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=minioadmin/20250301/us-east-1/s3/aws4_request, \
             SignedHeaders=host;x-amz-content-sha256;x-amz-date, Signature="
        ));

        let signature = signed.authorization.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let a = signer("secret-a")
            .sign("PUT", "localhost:9000", "/kguardian", "policy=", b"{}", now)
            .unwrap();
        let b = signer("secret-b")
            .sign("PUT", "localhost:9000", "/kguardian", "policy=", b"{}", now)
            .unwrap();

        assert_ne!(a.authorization, b.authorization);
    }
}
