use std::time::Duration;

use mediacache::{
    FileNameGenerator, HttpSource, Md5FileNameGenerator, new_builder, shared_client,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// -- Shared client scenario --

#[test]
fn derived_client_overrides_read_timeout_without_touching_shared() {
    let shared = shared_client();
    assert_eq!(shared.connect_timeout(), Duration::from_secs(60));
    assert_eq!(shared.read_timeout(), Duration::from_secs(60));

    let custom = new_builder()
        .read_timeout(Duration::from_secs(30))
        .build()
        .expect("derived client must build");

    assert_eq!(custom.read_timeout(), Duration::from_secs(30));
    assert_eq!(custom.connect_timeout(), Duration::from_secs(60));
    assert_eq!(shared.read_timeout(), Duration::from_secs(60));
    assert!(std::ptr::eq(shared, shared_client()));
    assert_eq!(shared_client().read_timeout(), Duration::from_secs(60));
}

#[tokio::test]
async fn shared_and_derived_clients_against_slow_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/segment.ts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![7u8; 188])
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    let url = format!("{}/segment.ts", server.uri());

    let impatient = new_builder()
        .read_timeout(Duration::from_millis(50))
        .build()
        .expect("derived client must build");
    assert!(
        impatient.get(&url).send().await.is_err(),
        "50ms read timeout must not survive a 500ms delay"
    );

    let resp = shared_client()
        .get(&url)
        .send()
        .await
        .expect("shared client tolerates the delay");
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.bytes().await.expect("body").len(), 188);
}

// -- Fetch and name --

#[tokio::test]
async fn fetched_resource_is_named_by_url_hash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/clip.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ftypisom".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    let url = format!("{}/media/clip.mp4", server.uri());

    let body = shared_client()
        .get(&url)
        .send()
        .await
        .expect("request")
        .bytes()
        .await
        .expect("body");
    assert_eq!(&body[..], b"ftypisom");

    let name = Md5FileNameGenerator.generate(&url, &url);
    assert_eq!(name, format!("{}.mp4", mediacache::file::md5_hex(&url)));
}

#[tokio::test]
async fn source_resumes_through_redirect_and_names_by_origin_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/watch/clip.mp4"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/cdn/clip.mp4"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/clip.mp4"))
        .and(header("range", "bytes=4-"))
        .respond_with(ResponseTemplate::new(206).set_body_raw(b"tail".to_vec(), "video/mp4"))
        .expect(1)
        .mount(&server)
        .await;
    let url = format!("{}/watch/clip.mp4", server.uri());

    let mut source = HttpSource::new(url.clone()).expect("source");
    assert!(!source.open(4).await.expect("open"));
    assert_eq!(source.info().length, Some(8));
    assert_eq!(source.mime().await, Some("video/mp4"));

    let mut buf = Vec::new();
    while source.read(&mut buf).await.expect("read") > 0 {}
    assert_eq!(buf, b"tail");

    let name = Md5FileNameGenerator.generate(source.url(), source.url());
    assert_eq!(name, format!("{}.mp4", mediacache::file::md5_hex(&url)));
}
