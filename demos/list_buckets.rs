use std::env;

use s3v2::{Auth, BlockingClient};

fn main() -> Result<(), s3v2::Error> {
    let auth = match Auth::from_env() {
        Ok(v) => v,
        Err(err) => {
            eprintln!("Set AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY: {err}");
            return Ok(());
        }
    };

    let mut builder = BlockingClient::builder().auth(auth);
    if let Ok(endpoint) = env::var("S3_ENDPOINT") {
        builder = builder.endpoint(endpoint);
    }
    let client = builder.build()?;

    for bucket in client.buckets().list().send()? {
        println!("{bucket}");
    }

    Ok(())
}
