use flate2::read::GzDecoder;
use fsdata_pack_packer::{compression::Compression, entry::BuildOptions};
use fsdata_pack_tests::{
    build_captive_portal, build_captive_portal_cached, header_value, response_split,
};
use std::{collections::HashSet, io::Read};
use test_case::test_case;

#[test]
fn walk_visits_every_file_once_from_root() {
    let fsdata = build_captive_portal_cached();

    let identifiers = fsdata
        .walk()
        .map(|file| file.identifier.as_str())
        .collect::<Vec<_>>();
    assert_eq!(identifiers.len(), fsdata.len());
    assert_eq!(
        identifiers.iter().collect::<HashSet<_>>().len(),
        fsdata.len()
    );

    // root is the last file in pack path order, walk goes backwards
    assert_eq!(identifiers.first(), Some(&"robots_txt"));
    assert_eq!(identifiers.last(), Some(&"api_status_json"));
}

#[test]
fn logical_names_drop_encoding_suffix() {
    let fsdata = build_captive_portal_cached();

    for file in fsdata.files() {
        let pack_path = &*file.entry.pack_path;
        let logical_name = file.entry.logical_name();

        let expected = pack_path
            .strip_suffix(".gz")
            .or_else(|| pack_path.strip_suffix(".br"))
            .unwrap_or(pack_path);
        assert_eq!(logical_name, expected);

        // name is stored NUL terminated at the start of data
        assert_eq!(&file.entry.data[..logical_name.len()], logical_name.as_bytes());
        assert_eq!(file.entry.data[logical_name.len()], 0);
    }

    assert!(fsdata.get_file_by_name("/index.html").is_some());
    assert!(fsdata.get_file_by_name("/index.html.gz").is_none());
}

#[test]
fn content_length_matches_body() {
    let fsdata = build_captive_portal_cached();

    for file in fsdata.walk() {
        if file.entry.logical_name() == "/generate_204" {
            continue;
        }

        let (header, body) = response_split(file.entry.response()).unwrap();
        assert!(header.starts_with("HTTP/1.0 200 OK\r\n"));
        assert_eq!(
            header_value(header, "Content-Length"),
            Some(body.len().to_string().as_str()),
            "{}",
            file.entry.pack_path
        );
        assert_eq!(header_value(header, "Server"), Some("OpenAce"));
    }
}

#[test_case("/index.html", "text/html", "gzip", "public, max-age=300")]
#[test_case("/hotspot-detect.html", "text/html", "text", "public, max-age=1")]
#[test_case("/ios.html", "text/html", "text", "public, max-age=0")]
#[test_case("/css/style.css", "text/css", "text", "public, max-age=31536000")]
#[test_case("/js/app.js", "application/javascript", "text", "public, max-age=31536000")]
#[test_case("/api/status.json", "application/json", "text", "public, max-age=31536000")]
#[test_case("/robots.txt", "text/plain", "text", "public, max-age=31536000")]
fn headers_are_resolved(
    name: &str,
    content_type: &str,
    content_encoding: &str,
    cache_control: &str,
) {
    let file = build_captive_portal_cached()
        .get_file_by_name(name)
        .unwrap();
    let (header, _) = response_split(file.entry.response()).unwrap();

    assert_eq!(header_value(header, "Content-type"), Some(content_type));
    assert_eq!(
        header_value(header, "Content-Encoding"),
        Some(content_encoding)
    );
    assert_eq!(header_value(header, "Cache-Control"), Some(cache_control));
}

#[test]
fn headers_included_file_is_stored_normalized() {
    let file = build_captive_portal_cached()
        .get_file_by_name("/generate_204")
        .unwrap();

    assert_eq!(file.entry.response(), b"HTTP/1.0 204 No Content\r\n\r\n");
}

#[test]
fn precompressed_body_is_stored_as_is() {
    let file = build_captive_portal_cached()
        .get_file_by_name("/index.html")
        .unwrap();
    let (_, body) = response_split(file.entry.response()).unwrap();

    let mut html = String::new();
    GzDecoder::new(body).read_to_string(&mut html).unwrap();
    assert!(html.contains("<html"));
}

#[test]
fn compression_replaces_plain_files_only_when_smaller() {
    let fsdata = build_captive_portal(&BuildOptions {
        compression: Some(Compression::Gzip),
        ..BuildOptions::default()
    })
    .unwrap();
    assert_eq!(fsdata.len(), build_captive_portal_cached().len());

    for file in fsdata.walk() {
        let name = file.entry.logical_name();
        let plain = build_captive_portal_cached()
            .get_file_by_name(name)
            .unwrap();

        // overridden files keep their stored form
        if ["/generate_204", "/hotspot-detect.html", "/ios.html", "/index.html"].contains(&name) {
            assert_eq!(file.entry, plain.entry);
            continue;
        }

        let (header, body) = response_split(file.entry.response()).unwrap();
        if file.entry.pack_path.ends_with(".gz") {
            assert_eq!(header_value(header, "Content-Encoding"), Some("gzip"));

            let (_, plain_body) = response_split(plain.entry.response()).unwrap();
            assert!(body.len() < plain_body.len());

            let mut decompressed = Vec::new();
            GzDecoder::new(body).read_to_end(&mut decompressed).unwrap();
            assert_eq!(decompressed, plain_body);
        } else {
            assert_eq!(file.entry, plain.entry);
        }
    }
}
