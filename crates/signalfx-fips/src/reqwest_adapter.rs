// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use reqwest::blocking::ClientBuilder;
use std::error::Error;
#[cfg(feature = "fips")]
use tracing::debug;

/// Creates a blocking reqwest client builder for the ingest endpoint.
/// Without the "fips" feature this is reqwest's default rustls TLS stack.
#[cfg(not(feature = "fips"))]
pub fn create_blocking_client_builder() -> Result<ClientBuilder, Box<dyn Error + Send + Sync>> {
    Ok(reqwest::blocking::Client::builder().use_rustls_tls())
}

/// Creates a blocking reqwest client builder with a FIPS-compliant rustls configuration.
///
/// The process must have installed a FIPS crypto provider beforehand, e.g. with
/// `rustls::crypto::default_fips_provider().install_default()`.
#[cfg(feature = "fips")]
pub fn create_blocking_client_builder() -> Result<ClientBuilder, Box<dyn Error + Send + Sync>> {
    let provider =
        rustls::crypto::CryptoProvider::get_default().ok_or("No crypto provider configured")?;

    if !provider.fips() {
        return Err("Crypto provider is not FIPS-compliant".into());
    }

    let mut root_cert_store = rustls::RootCertStore::empty();
    let native_certs = rustls_native_certs::load_native_certs();
    let mut valid_count = 0;
    for cert in native_certs.certs {
        match root_cert_store.add(cert) {
            Ok(()) => valid_count += 1,
            Err(err) => {
                debug!("Skipping unparseable native certificate: {:?}", err);
            }
        }
    }
    if valid_count == 0 {
        return Err("No valid certificates found in native root store".into());
    }

    let versions = rustls::ALL_VERSIONS.to_vec();
    let config = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_protocol_versions(&versions)
        .map_err(|_| "Failed to set protocol versions")?
        .with_root_certificates(root_cert_store)
        .with_no_client_auth();

    if !config.fips() {
        return Err("The final TLS configuration is not FIPS-compliant".into());
    }
    debug!("Ingest client builder is configured with FIPS, {valid_count} root certificates loaded");

    Ok(reqwest::blocking::Client::builder().use_preconfigured_tls(config))
}
