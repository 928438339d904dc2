use url::{ParseError, Url};

pub fn to_url(host: String) -> Result<Url, ParseError> {
    Url::parse(&host)
}

/// Builds `https://<host>/<bucket>/<key>`, percent-encoding the bucket and every key segment.
pub fn public_object_url(host: &str, bucket: &str, key: &str) -> Result<Url, ParseError> {
    let mut url = to_url(format!("https://{}/", host.trim_end_matches('/')))?;
    url.path_segments_mut()
        .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
        .clear()
        .push(bucket)
        .extend(key.split('/'));
    Ok(url)
}

#[cfg(test)]
mod cfg_tests {
    use crate::utils::urls::public_object_url;

    #[test]
    pub fn test_public_object_url() {
        let url = public_object_url(
            "storage.googleapis.com",
            "photograma.appspot.com",
            "images/1700000000000-cat.png",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://storage.googleapis.com/photograma.appspot.com/images/1700000000000-cat.png"
        );

        let url = public_object_url("cdn.example.com/", "bucket", "images/1-my photo#1.jpg").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cdn.example.com/bucket/images/1-my%20photo%231.jpg"
        );
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    pub fn test_public_object_url_rejects_bad_host() {
        assert!(public_object_url("", "bucket", "images/a.jpg").is_err());
    }
}
