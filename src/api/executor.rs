use bytes::Bytes;
use log::{debug, error, warn};
use reqwest::Request;
use serde::de::DeserializeOwned;

use crate::api::context::Context;
use crate::api::error::{ApiError, Error, ErrorResponse, Result, TransportCause};
use crate::api::response::Response;
use crate::api::GitHubAPI;

impl GitHubAPI {
    /// Sends `request` and returns the raw body of a 2xx response
    pub async fn execute_raw(&self, ctx: &Context, request: Request) -> Result<(Bytes, Response)> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("{} {}", method, url);

        let sent = ctx.run(self.client.execute(request)).await.map_err(|cause| {
            error!("{} {}: {}", method, url, cause);
            cause
        })?;
        let http_response = sent.map_err(|e| {
            error!("{:?}", e);
            TransportCause::Http(e)
        })?;

        let response = Response::new(http_response.status(), http_response.headers().clone());
        let body = match ctx.run(http_response.bytes()).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                error!("{:?}", e);
                return Err(Error::Body {
                    cause: TransportCause::Http(e),
                    response: Box::new(response),
                });
            }
            Err(cause) => {
                error!("{} {}: {}", method, url, cause);
                return Err(Error::Body {
                    cause,
                    response: Box::new(response),
                });
            }
        };

        if !response.status.is_success() {
            return Err(api_error(response, &body));
        }
        Ok((body, response))
    }

    /// Sends `request` and decodes a 2xx JSON body into `T`
    ///
    /// An empty body is decoded as `null`, which suits `Option<T>` and `()`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        request: Request,
    ) -> Result<(T, Response)> {
        let (body, response) = self.execute_raw(ctx, request).await?;
        let data: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };
        match serde_json::from_slice(data) {
            Ok(value) => Ok((value, response)),
            Err(e) => {
                error!("{:?}", e);
                debug!("{}", String::from_utf8_lossy(&body));
                Err(Error::Decode {
                    source: e,
                    response: Box::new(response),
                })
            }
        }
    }
}

fn api_error(response: Response, body: &[u8]) -> Error {
    let text = String::from_utf8_lossy(body).into_owned();
    warn!("{} result: {}", response.status, text);
    let error = serde_json::from_slice::<ErrorResponse>(body).ok();
    Error::Api(Box::new(ApiError {
        response,
        error,
        body: text,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::Config;
    use reqwest::{Method, StatusCode};
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, PartialEq, Deserialize)]
    struct Meta {
        verifiable_password_authentication: bool,
    }

    async fn api_for(server: &MockServer) -> GitHubAPI {
        GitHubAPI::new(Config::new().base_url(&server.uri()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn decodes_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/meta"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-RateLimit-Limit", "60")
                    .insert_header("X-RateLimit-Remaining", "59")
                    .set_body_json(json!({"verifiable_password_authentication": true})),
            )
            .mount(&server)
            .await;
        let api = api_for(&server).await;
        let req = api.new_request::<()>(Method::GET, "meta", None).unwrap();
        let (meta, response): (Meta, _) = api.execute(&Context::background(), req).await.unwrap();
        assert!(meta.verifiable_password_authentication);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.rate.unwrap().remaining, 59);
    }

    #[tokio::test]
    async fn empty_body_into_option() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        let api = api_for(&server).await;
        let req = api.new_request::<()>(Method::GET, "empty", None).unwrap();
        let (value, response): (Option<Meta>, _) =
            api.execute(&Context::background(), req).await.unwrap();
        assert!(value.is_none());
        assert_eq!(response.status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn non_success_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/meta"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Validation Failed",
                "errors": [{"resource": "Issue", "field": "title", "code": "missing_field"}],
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;
        let api = api_for(&server).await;
        let req = api.new_request::<()>(Method::GET, "meta", None).unwrap();
        let err = api
            .execute::<Meta>(&Context::background(), req)
            .await
            .unwrap_err();
        match err {
            Error::Api(e) => {
                assert_eq!(e.status(), StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(e.message(), "Validation Failed");
                let payload = e.error.unwrap();
                assert_eq!(payload.errors[0].field.as_deref(), Some("title"));
                assert_eq!(payload.errors[0].code.as_deref(), Some("missing_field"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_error_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/meta"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        let api = api_for(&server).await;
        let req = api.new_request::<()>(Method::GET, "meta", None).unwrap();
        let err = api
            .execute::<Meta>(&Context::background(), req)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        match err {
            Error::Api(e) => {
                assert!(e.error.is_none());
                assert_eq!(e.message(), "bad gateway");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn bad_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/meta"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;
        let api = api_for(&server).await;
        let req = api.new_request::<()>(Method::GET, "meta", None).unwrap();
        let err = api
            .execute::<Meta>(&Context::background(), req)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn cancelled_context_never_sends() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let api = api_for(&server).await;
        let ctx = Context::background();
        ctx.cancel();
        let req = api.new_request::<()>(Method::GET, "meta", None).unwrap();
        let err = api.execute::<Meta>(&ctx, req).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportCause::Cancelled)));
        assert!(err.response().is_none());
    }

    /// Serves one connection: headers promising 1000 bytes, a partial body,
    /// then either a stall or a closed socket
    async fn partial_body_server(stall: bool) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = "HTTP/1.1 200 OK\r\n\
                        Content-Type: application/json\r\n\
                        Content-Length: 1000\r\n\
                        X-RateLimit-Limit: 5000\r\n\
                        X-RateLimit-Remaining: 4321\r\n\
                        \r\n\
                        {\"total_seats";
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            if stall {
                tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn stalled_body_keeps_response() {
        let uri = partial_body_server(true).await;
        let api = GitHubAPI::new(Config::new().base_url(&uri).unwrap()).unwrap();
        let ctx = Context::background().timeout(std::time::Duration::from_millis(300));
        let req = api.new_request::<()>(Method::GET, "meta", None).unwrap();
        let err = api.execute::<Meta>(&ctx, req).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Body {
                cause: TransportCause::DeadlineExceeded,
                ..
            }
        ));
        let response = err.response().unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.rate.as_ref().unwrap().remaining, 4321);
    }

    #[tokio::test]
    async fn truncated_body_keeps_response() {
        let uri = partial_body_server(false).await;
        let api = GitHubAPI::new(Config::new().base_url(&uri).unwrap()).unwrap();
        let req = api.new_request::<()>(Method::GET, "meta", None).unwrap();
        let err = api
            .execute::<Meta>(&Context::background(), req)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Body {
                cause: TransportCause::Http(_),
                ..
            }
        ));
        assert_eq!(err.response().unwrap().rate.as_ref().unwrap().limit, 5000);
    }
}
