use super::{ApiError, Client, Reply, ensure_success};
use reqwest::blocking::multipart::Form;

pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

pub fn register(client: &mut Client, registration: Registration) -> Result<Reply, ApiError> {
    let form = Form::new()
        .text("username", registration.username.to_string())
        .text("email", registration.email.to_string())
        .text("password", registration.password.to_string());

    let request = client.post("/register").multipart(form);
    let reply = client.send_for_reply(request)?;

    if let Some(user_id) = &reply.user_id {
        client.session_mut().user_id = Some(user_id.clone());
    }

    Ok(reply)
}

/// Logs in and records the identity on the client's session. Cookies from
/// the response are already absorbed by the time this returns.
pub fn login(client: &mut Client, username: &str, password: &str) -> Result<Reply, ApiError> {
    let form = Form::new()
        .text("username", username.to_string())
        .text("password", password.to_string());

    let request = client.post("/login").multipart(form);
    let reply = client.send_for_reply(request)?;

    let session = client.session_mut();
    session.username = Some(username.to_string());
    if let Some(user_id) = &reply.user_id {
        session.user_id = Some(user_id.clone());
    }

    Ok(reply)
}

/// Only the status matters here; the body is usually the index page.
pub fn logout(client: &mut Client) -> Result<(), ApiError> {
    let request = client.get("/logout");
    ensure_success(client.send(request)?)?;

    *client.session_mut() = Default::default();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client, json, serve};
    use crate::session::Session;

    #[test]
    fn test_register_sends_form_fields() {
        let (base_url, server) = serve(vec![json(
            201,
            r#"{"message": "User registered successfully", "user_id": "u-1"}"#,
        )]);
        let mut client = client(&base_url, Session::default());

        let reply = register(
            &mut client,
            Registration {
                username: "ada",
                email: "ada@example.com",
                password: "hunter2",
            },
        )
        .unwrap();

        assert_eq!(reply.text(), Some("User registered successfully"));
        assert_eq!(client.session().user_id.as_deref(), Some("u-1"));

        let request = &server.join().unwrap()[0];
        assert!(request.starts_with("POST /register"));
        assert!(request.contains("multipart/form-data"));
        assert!(request.contains("name=\"username\"\r\n\r\nada"));
        assert!(request.contains("name=\"email\"\r\n\r\nada@example.com"));
        assert!(request.contains("name=\"password\"\r\n\r\nhunter2"));
    }

    #[test]
    fn test_register_conflict_surfaces_error() {
        let (base_url, server) = serve(vec![json(409, r#"{"error": "Username or email already taken"}"#)]);
        let mut client = client(&base_url, Session::default());

        let result = register(
            &mut client,
            Registration {
                username: "ada",
                email: "ada@example.com",
                password: "x",
            },
        );

        match result {
            Err(ApiError::Rejected { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "Username or email already taken");
            }
            other => panic!("unexpected: {:?}", other.map(|r| r.message)),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_login_keeps_cookie_and_username() {
        let (base_url, server) = serve(vec![
            json(200, r#"{"message": "Logged in"}"#)
                .with_header("Set-Cookie", "session=s3cr3t; HttpOnly; Path=/"),
        ]);
        let mut client = client(&base_url, Session::default());

        let reply = login(&mut client, "ada", "hunter2").unwrap();

        assert_eq!(reply.text(), Some("Logged in"));
        assert_eq!(client.session().username.as_deref(), Some("ada"));
        assert_eq!(client.session().cookie_header().as_deref(), Some("session=s3cr3t"));
        server.join().unwrap();
    }

    #[test]
    fn test_login_failure_leaves_session() {
        let (base_url, server) = serve(vec![json(401, r#"{"error": "Invalid credentials"}"#)]);
        let mut client = client(&base_url, Session::default());

        let err = login(&mut client, "ada", "wrong").unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(client.session(), &Session::default());
        server.join().unwrap();
    }

    #[test]
    fn test_logout_clears_session() {
        let (base_url, server) = serve(vec![json(200, "")]);
        let mut session = Session::default();
        session.absorb_set_cookie("session=abc");
        session.username = Some("ada".to_string());
        let mut client = client(&base_url, session);

        logout(&mut client).unwrap();

        assert!(!client.session().is_logged_in());
        assert_eq!(client.session().username, None);
        let request = &server.join().unwrap()[0];
        assert!(request.starts_with("GET /logout"));
    }

    #[test]
    fn test_logout_failure_keeps_session() {
        let (base_url, server) = serve(vec![json(500, "")]);
        let mut session = Session::default();
        session.absorb_set_cookie("session=abc");
        let mut client = client(&base_url, session);

        let err = logout(&mut client).unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(client.session().is_logged_in());
        server.join().unwrap();
    }
}
