// ABOUTME: Wiremock helpers that imitate the Nexus 3 REST and docker v2 APIs.
// ABOUTME: Search pages, schema 1/2 manifests, config blobs, and manifest deletes.

use nexus_retention::config::RegistryConfig;
use serde_json::{Value, json};
use wiremock::matchers::{basic_auth, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN: &str = "cleaner";
pub const PASSWORD: &str = "s3cret";
pub const SEARCH_PATH: &str = "/service/rest/v1/search";

/// Registry settings pointing at the mock server.
pub fn registry_config(server: &MockServer) -> RegistryConfig {
    let address = server.address();
    RegistryConfig::new(
        &format!("http://{}", address.ip()),
        address.port(),
        LOGIN,
        PASSWORD,
    )
    .unwrap()
}

pub fn manifest_path(repository: &str, name: &str, reference: &str) -> String {
    format!("/repository/{}/v2/{}/manifests/{}", repository, name, reference)
}

pub fn blob_path(repository: &str, name: &str, digest: &str) -> String {
    format!("/repository/{}/v2/{}/blobs/{}", repository, name, digest)
}

/// 64 hex characters built from a short seed.
pub fn sha256(seed: char) -> String {
    seed.to_string().repeat(64)
}

/// A search item the way Nexus reports a docker component.
pub fn component(
    server: &MockServer,
    repository: &str,
    name: &str,
    version: &str,
    sha256: &str,
) -> Value {
    json!({
        "id": format!("{}-{}-{}", repository, name, version),
        "repository": repository,
        "format": "docker",
        "group": null,
        "name": name,
        "version": version,
        "assets": [{
            "downloadUrl": format!("{}{}", server.uri(), manifest_path(repository, name, version)),
            "path": format!("v2/{}/manifests/{}", name, version),
            "repository": repository,
            "format": "docker",
            "checksum": { "sha1": "0".repeat(40), "sha256": sha256 }
        }]
    })
}

/// Mount a single search page for the first request (no continuation token).
pub async fn mount_search(server: &MockServer, items: Vec<Value>, next_token: Option<&str>) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("format", "docker"))
        .and(query_param_is_missing("continuationToken"))
        .and(basic_auth(LOGIN, PASSWORD))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": items, "continuationToken": next_token })),
        )
        .mount(server)
        .await;
}

/// Mount the page returned for a given continuation token.
pub async fn mount_search_page(
    server: &MockServer,
    token: &str,
    items: Vec<Value>,
    next_token: Option<&str>,
) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("continuationToken", token))
        .and(basic_auth(LOGIN, PASSWORD))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": items, "continuationToken": next_token })),
        )
        .mount(server)
        .await;
}

/// Mount a schema 1 manifest whose newest history entry carries `created`.
pub async fn mount_schema1_manifest(
    server: &MockServer,
    repository: &str,
    name: &str,
    version: &str,
    created: &str,
) {
    let v1 = json!({ "id": "layer", "created": created }).to_string();
    Mock::given(method("GET"))
        .and(path(manifest_path(repository, name, version)))
        .and(basic_auth(LOGIN, PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemaVersion": 1,
            "name": name,
            "tag": version,
            "history": [
                { "v1Compatibility": v1 },
                { "v1Compatibility": json!({ "id": "base", "created": "2001-01-01T00:00:00Z" }).to_string() }
            ]
        })))
        .mount(server)
        .await;
}

/// Mount a schema 2 manifest and the config blob it points to.
pub async fn mount_schema2_manifest(
    server: &MockServer,
    repository: &str,
    name: &str,
    version: &str,
    created: &str,
) {
    let config_digest = format!("sha256:{}", sha256('c'));
    Mock::given(method("GET"))
        .and(path(manifest_path(repository, name, version)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemaVersion": 2,
            "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
            "config": {
                "mediaType": "application/vnd.docker.container.image.v1+json",
                "size": 1234,
                "digest": config_digest
            },
            "layers": []
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(blob_path(repository, name, &config_digest)))
        .and(basic_auth(LOGIN, PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "architecture": "amd64",
            "created": created,
            "os": "linux"
        })))
        .mount(server)
        .await;
}

/// Mount a digest-addressed manifest delete answering with `status`.
pub async fn mount_delete(
    server: &MockServer,
    repository: &str,
    name: &str,
    sha256: &str,
    status: u16,
) {
    Mock::given(method("DELETE"))
        .and(path(manifest_path(
            repository,
            name,
            &format!("sha256:{}", sha256),
        )))
        .and(basic_auth(LOGIN, PASSWORD))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}
