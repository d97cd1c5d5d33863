use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use serde_json::{json, Value};

// Shared test context
struct TestContext {
    client: reqwest::Client,
    base_url: String,
    server: Child,
}

impl TestContext {
    async fn start() -> Self {
        let port = {
            let probe = TcpListener::bind("127.0.0.1:0").unwrap();
            probe.local_addr().unwrap().port()
        };

        let server = Command::new(env!("CARGO_BIN_EXE_bookstore"))
            .env("JWT_SECRET", "integration-secret-integration-secret-0123")
            .env("BIND_ADDR", format!("127.0.0.1:{}", port))
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let context = Self {
            client: reqwest::Client::new(),
            base_url: format!("http://127.0.0.1:{}", port),
            server,
        };
        context.wait_until_ready().await;
        context
    }

    async fn wait_until_ready(&self) {
        for _ in 0..100 {
            if self.client.get(&self.base_url).send().await.is_ok() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("server did not start on {}", self.base_url);
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = self.server.kill();
        let _ = self.server.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_login_review_and_delete() {
        let context = TestContext::start().await;

        // Step 1: Registration, then a duplicate
        let reg_response = context.client.post(format!("{}/register", context.base_url))
            .json(&json!({"username": "alice", "password": "pw1"}))
            .send()
            .await
            .unwrap();
        assert_eq!(reg_response.status().as_u16(), 201, "Registration failed");

        let dup_response = context.client.post(format!("{}/register", context.base_url))
            .json(&json!({"username": "alice", "password": "pw2"}))
            .send()
            .await
            .unwrap();
        assert_eq!(dup_response.status().as_u16(), 409);

        // Step 2: Login
        let login_response = context.client.post(format!("{}/customer/login", context.base_url))
            .json(&json!({"username": "alice", "password": "pw1"}))
            .send()
            .await
            .unwrap();
        assert_eq!(login_response.status().as_u16(), 200, "Login failed");
        let login_body: Value = login_response.json().await.unwrap();
        assert_eq!(login_body["username"], "alice");
        let token = login_body["token"].as_str().unwrap().to_string();

        // Step 3: Write a review
        let put_response = context.client.put(format!("{}/customer/auth/review/1", context.base_url))
            .bearer_auth(&token)
            .json(&json!({"review": "Great"}))
            .send()
            .await
            .unwrap();
        assert_eq!(put_response.status().as_u16(), 200);

        let reviews: Value = context.client.get(format!("{}/review/1", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(reviews["reviews"]["alice"], "Great");

        // Step 4: Delete it
        let delete_response = context.client.delete(format!("{}/customer/auth/review/1", context.base_url))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(delete_response.status().as_u16(), 200);

        let reviews: Value = context.client.get(format!("{}/review/1", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(reviews["reviews"].get("alice").is_none());

        // Step 5: No token
        let anonymous = context.client.delete(format!("{}/customer/auth/review/1", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(anonymous.status().as_u16(), 401);
    }
}
