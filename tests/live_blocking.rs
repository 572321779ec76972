//! Runs against a real S3-compatible service when `S3_TEST_ENDPOINT` and AWS credentials
//! are set, and is a no-op otherwise.

mod common;

use http::StatusCode;

use s3v2::{AddressingStyle, Acl, BlockingClient, Error};

fn build_client(cfg: &common::LiveConfig) -> Result<BlockingClient, Error> {
    BlockingClient::builder()
        .endpoint(cfg.endpoint.as_str())
        .https(cfg.https)
        .auth(cfg.auth.clone())
        .acl(Acl::Private)
        .addressing_style(AddressingStyle::Path)
        .build()
}

#[test]
fn live_bucket_and_object_roundtrip() -> Result<(), Error> {
    let Some(cfg) = common::load_live_config()? else {
        return Ok(());
    };
    let client = build_client(&cfg)?;
    let bucket = common::unique_bucket("s3v2-test-");

    client.buckets().create(&bucket).send()?.error_for_status()?;
    assert!(client.buckets().list().send()?.contains(&bucket));

    let key = "dir/hello world.txt";
    client
        .objects()
        .put(&bucket, key)
        .body_bytes("hello from s3v2")
        .metadata("suite", "live")
        .send()?
        .error_for_status()?;

    let got = client.objects().get(&bucket, key).send()?.error_for_status()?;
    assert_eq!(got.body().map(|b| b.as_ref()), Some(&b"hello from s3v2"[..]));

    let missing = client.objects().get(&bucket, "nope").send()?;
    assert_eq!(missing.status(), Some(StatusCode::NOT_FOUND));

    client.objects().delete(&bucket, key).send()?.error_for_status()?;
    client.buckets().delete(&bucket).send()?.error_for_status()?;
    Ok(())
}

#[test]
fn live_file_upload() -> Result<(), Error> {
    use std::io::Write as _;

    let Some(cfg) = common::load_live_config()? else {
        return Ok(());
    };
    let client = build_client(&cfg)?;
    let bucket = common::unique_bucket("s3v2-file-");
    client.buckets().create(&bucket).send()?.error_for_status()?;

    let mut tmp = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .map_err(|e| Error::io("tempfile", e))?;
    tmp.write_all(br#"{"ok":true}"#)
        .map_err(|e| Error::io("tempfile write", e))?;

    client
        .objects()
        .put(&bucket, "data.json")
        .body_file(tmp.path())
        .send()?
        .error_for_status()?;

    let got = client
        .objects()
        .get(&bucket, "data.json")
        .send()?
        .error_for_status()?;
    assert_eq!(got.body_text().as_deref(), Some(r#"{"ok":true}"#));

    client.objects().delete(&bucket, "data.json").send()?;
    client.buckets().delete(&bucket).send()?.error_for_status()?;
    Ok(())
}
