use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use s3v2::{Acl, Auth, BlockingClient};

fn main() -> Result<(), s3v2::Error> {
    let bucket = match env::var("S3_BUCKET") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Set S3_BUCKET to a bucket you can write to.");
            return Ok(());
        }
    };

    let auth = match Auth::from_env() {
        Ok(v) => v,
        Err(err) => {
            eprintln!("Set AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY: {err}");
            return Ok(());
        }
    };

    let mut builder = BlockingClient::builder().auth(auth).acl(Acl::Private);
    if let Ok(endpoint) = env::var("S3_ENDPOINT") {
        builder = builder.endpoint(endpoint);
    }
    let client = builder.build()?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let key = format!("demos/put-get-delete-{now}.txt");

    let put = client
        .objects()
        .put(&bucket, &key)
        .content_type("text/plain")
        .body_bytes(b"hello from s3v2\n".to_vec())
        .send()?
        .error_for_status()?;
    println!("put {key}: {:?}", put.status());

    let got = client.objects().get(&bucket, &key).send()?.error_for_status()?;
    let bytes = got.into_body().unwrap_or_default();
    println!("downloaded {} bytes", bytes.len());

    let deleted = client.objects().delete(&bucket, &key).send()?;
    match deleted.error() {
        Some(err) => eprintln!("delete failed: {err}"),
        None => println!("delete: {:?}", deleted.status()),
    }
    Ok(())
}
