//! Tests for interceptor chains.

use std::sync::{Arc, Mutex};

use super::test_support::json;
use super::{
    ApiError, BoxError, Error, HttpResponse, Interceptors, RequestOptions, error_fn, request_fn,
    response_fn,
};

type Rewrite = std::future::Ready<Result<(String, RequestOptions), BoxError>>;

/// Request interceptor body that appends `/{tag}` to the endpoint.
fn appending(tag: &'static str) -> impl Fn(String, RequestOptions) -> Rewrite + Send + Sync {
    move |endpoint, options| std::future::ready(Ok((format!("{endpoint}/{tag}"), options)))
}

mod request_chain {
    use super::*;

    #[tokio::test]
    async fn empty_chain_returns_input() {
        let chains = Interceptors::new();

        let (endpoint, options) = chains
            .apply_request("/users".to_string(), RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(endpoint, "/users");
        assert_eq!(options.method, http::Method::GET);
    }

    #[tokio::test]
    async fn runs_in_registration_order() {
        let mut chains = Interceptors::new();
        chains.push_request(request_fn(appending("a")));
        chains.push_request(request_fn(appending("b")));

        let (endpoint, _) = chains
            .apply_request("/x".to_string(), RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(endpoint, "/x/a/b");
    }

    #[tokio::test]
    async fn can_rewrite_options() {
        let mut chains = Interceptors::new();
        chains.push_request(request_fn(|endpoint, options: RequestOptions| async move {
            Ok::<_, BoxError>((endpoint, options.with_headers([("Authorization", "Bearer t")])))
        }));

        let (_, options) = chains
            .apply_request("/x".to_string(), RequestOptions::new())
            .await
            .unwrap();

        assert!(options.headers.is_some());
    }

    #[tokio::test]
    async fn failure_stops_chain() {
        let seen = Arc::new(Mutex::new(0));
        let counter = seen.clone();
        let mut chains = Interceptors::new();
        chains.push_request(request_fn(|_, _| async {
            Err::<(String, RequestOptions), BoxError>("no token".into())
        }));
        chains.push_request(request_fn(move |endpoint, options| {
            *counter.lock().unwrap() += 1;
            async move { Ok::<_, BoxError>((endpoint, options)) }
        }));

        let result = chains
            .apply_request("/x".to_string(), RequestOptions::new())
            .await;

        assert!(matches!(result, Err(Error::Interceptor(ref e)) if e.to_string() == "no token"));
        assert_eq!(*seen.lock().unwrap(), 0);
    }
}

mod response_chain {
    use super::*;

    #[tokio::test]
    async fn rewrites_in_order() {
        let mut chains = Interceptors::new();
        chains.push_response(response_fn(|mut resp: HttpResponse| async move {
            resp.body.extend_from_slice(b"a");
            Ok::<_, BoxError>(resp)
        }));
        chains.push_response(response_fn(|mut resp: HttpResponse| async move {
            resp.body.extend_from_slice(b"b");
            Ok::<_, BoxError>(resp)
        }));

        let resp = chains.apply_response(json(200, "")).await.unwrap();

        assert_eq!(resp.body, b"ab".to_vec());
    }

    #[tokio::test]
    async fn failure_maps_to_interceptor_error() {
        let mut chains = Interceptors::new();
        chains.push_response(response_fn(|_| async {
            Err::<HttpResponse, BoxError>("bad envelope".into())
        }));

        let result = chains.apply_response(json(200, "{}")).await;

        assert!(matches!(result, Err(Error::Interceptor(_))));
    }
}

mod error_chain {
    use super::*;

    #[tokio::test]
    async fn notifies_every_interceptor_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chains = Interceptors::new();
        for tag in ["first", "second"] {
            let log = log.clone();
            chains.push_error(error_fn(move |error: &Error| {
                log.lock().unwrap().push(format!("{tag}: {error}"));
                async {}
            }));
        }

        let error = Error::from(ApiError::from_status(http::StatusCode::NOT_FOUND, None));
        chains.notify_error(&error).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first: HTTP 404: Not Found", "second: HTTP 404: Not Found"]
        );
    }

    #[tokio::test]
    async fn empty_chain_is_noop() {
        let chains = Interceptors::new();

        chains.notify_error(&Error::invalid_header("X", "bad")).await;
    }
}

mod registry {
    use super::*;

    #[test]
    fn counts_track_each_chain() {
        let mut chains = Interceptors::new();
        assert!(chains.is_empty());

        chains.push_request(request_fn(appending("a")));
        chains.push_error(error_fn(|_: &Error| async {}));
        chains.push_error(error_fn(|_: &Error| async {}));

        assert_eq!(chains.counts(), (1, 0, 2));
        assert!(!chains.is_empty());
    }

    #[test]
    fn clones_share_interceptors() {
        let mut chains = Interceptors::new();
        chains.push_response(response_fn(|resp| async move { Ok::<_, BoxError>(resp) }));

        let copy = chains.clone();

        assert_eq!(copy.counts(), (0, 1, 0));
    }

    #[test]
    fn debug_shows_counts() {
        let mut chains = Interceptors::new();
        chains.push_request(request_fn(appending("a")));

        let debug = format!("{chains:?}");

        assert!(debug.contains("Interceptors"));
        assert!(debug.contains("request: 1"));
        assert!(debug.contains("error: 0"));
    }
}
