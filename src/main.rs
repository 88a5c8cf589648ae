use anyhow::Context;
use rand::thread_rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use textbook_rsa::{decrypt, encrypt, generate_rsa_keys, KeyGenConfig};

const SAMPLE_MESSAGE: &str = "My name is Malik Makkes.";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = KeyGenConfig::from_env().context("Failed to load key generation config")?;
    info!(start = config.start, end = config.end, "sampling primes");

    let (private_key, public_key) =
        generate_rsa_keys(&mut thread_rng(), &config).context("Failed to generate RSA keys")?;
    info!(bits = public_key.bit_length(), n = %public_key.n(), e = %public_key.e(), "key pair ready");

    let cipher = encrypt(&public_key, SAMPLE_MESSAGE).context("Failed to encrypt sample message")?;
    let rendered: Vec<String> = cipher.iter().map(ToString::to_string).collect();
    println!("The encrypted message is : [{}]\n", rendered.join(", "));

    let plain = decrypt(&private_key, &cipher).context("Failed to decrypt sample message")?;
    println!("The decrypted message is : {}\n", plain);

    Ok(())
}
