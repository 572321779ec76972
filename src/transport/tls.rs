use std::sync::Once;

/// Installs the ring provider as the process default unless another one is already set.
///
/// Both the verifying and the non-verifying `ureq` agent resolve their rustls config
/// through the process default.
pub(crate) fn ensure_rustls_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if rustls::crypto::CryptoProvider::get_default().is_some() {
            return;
        }
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("another rustls crypto provider was installed concurrently");
        }
    });
}
