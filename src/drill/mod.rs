// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::drill::server::ServeOptions;
    use crate::drill::server::start_server;
    use crate::error::Fallible;
    use crate::judge::Judge;

    /// Start a server on a free port and wait for it to accept connections.
    async fn spawn_server() -> String {
        let port = portpicker::pick_unused_port().unwrap();
        let options = ServeOptions {
            port,
            seed: Some(42),
            open_browser: false,
            judge: Judge::Disabled,
        };
        spawn(async move { start_server(options).await });
        let addr = format!("0.0.0.0:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&addr).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_static_assets_and_fallback() -> Fallible<()> {
        let base = spawn_server().await;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the `script.js` endpoint.
        let response = reqwest::get(format!("{base}/script.js")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_root_page() -> Fallible<()> {
        let base = spawn_server().await;
        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await?;
        // Fresh session: vocabulary tier A, forward mode, zero streak.
        assert!(html.contains("sprachdrill"));
        assert!(html.contains("Translate into Spanish"));
        assert!(html.contains("Streak: 0 / 5"));
        Ok(())
    }

    #[tokio::test]
    async fn test_change_drill_kind_and_tier() -> Fallible<()> {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[
                ("action", "Change"),
                ("kind", "Verbs"),
                ("difficulty", "C"),
            ])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Conjugate"));
        assert!(html.contains("Streak: 0 / 5"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_answer_is_rejected() -> Fallible<()> {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("action", "Submit"), ("answer", "   ")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Enter an answer first."));
        // The answer form is still there: no state transition happened.
        assert!(html.contains("id=\"submit\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_answer_yields_fallback_feedback() -> Fallible<()> {
        let base = spawn_server().await;
        let client = reqwest::Client::new();

        // No judge is configured, so a non-exact answer degrades to the
        // exact-match fallback.
        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "Submit"), ("answer", "zzzz")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Not quite."));
        assert!(html.contains("The correct answer is"));

        // Requesting the next item discards the feedback.
        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "Next")])
            .send()
            .await?;
        let html = response.text().await?;
        assert!(!html.contains("Not quite."));
        assert!(html.contains("id=\"submit\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_speak_queues_an_utterance() -> Fallible<()> {
        let base = spawn_server().await;
        let client = reqwest::Client::new();
        let response = client
            .post(format!("{base}/"))
            .form(&[("action", "Speak")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("data-speak-text"));
        assert!(html.contains("data-speak-lang=\"de-DE\""));

        // The utterance is one-shot.
        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(!html.contains("data-speak-text"));
        Ok(())
    }

    #[tokio::test]
    async fn test_user_feedback_endpoint() -> Fallible<()> {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/feedback"))
            .form(&[
                ("email", "anna@example.com"),
                ("message", "More verbs, please!"),
            ])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Thanks for your feedback!"));
        Ok(())
    }
}
