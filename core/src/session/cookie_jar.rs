use std::sync::{PoisonError, RwLock};

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::Url;

/// Cookie store shared by every request of one session.
///
/// Unlike [`Jar`] it can be emptied, which the connection validator needs when
/// a session is revalidated.
#[derive(Debug, Default)]
pub struct CookieJar {
    inner: RwLock<Jar>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cookie_str(&self, cookie: &str, url: &Url) {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .add_cookie_str(cookie, url);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Jar::default();
    }
}

impl CookieStore for CookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .cookies(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_drops_stored_cookies() {
        // Arrange
        let jar = CookieJar::new();
        let url = Url::parse("https://cloud.example.com/").unwrap();
        jar.add_cookie_str("oc_session=abc123; Path=/", &url);
        assert_eq!(jar.cookies(&url).unwrap(), "oc_session=abc123");

        // Act
        jar.clear();

        // Assert
        assert!(jar.cookies(&url).is_none());
    }

    #[test]
    fn set_cookies_stores_response_cookies() {
        // Arrange
        let jar = CookieJar::new();
        let url = Url::parse("https://cloud.example.com/status.php").unwrap();
        let headers = [HeaderValue::from_static("oc_token=xyz; Path=/")];

        // Act
        jar.set_cookies(&mut headers.iter(), &url);

        // Assert
        let other_path = Url::parse("https://cloud.example.com/remote.php/dav").unwrap();
        assert_eq!(jar.cookies(&other_path).unwrap(), "oc_token=xyz");
    }
}
