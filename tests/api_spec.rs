use axum::http::{Method, StatusCode};
use axum_test::{TestResponse, TestServer};
use mergington_activities::api::{create_router, INDEX_PATH};
use mergington_activities::config::ServerConfig;
use mergington_activities::models::*;
use mergington_activities::store::{CapacityPolicy, RosterStore};

fn setup() -> TestServer {
    setup_with(RosterStore::new(default_catalog()))
}

fn setup_with(store: RosterStore) -> TestServer {
    let app = create_router(store, &ServerConfig::default());
    TestServer::new(app).expect("Failed to create test server")
}

async fn activities(server: &TestServer) -> Catalog {
    server.get("/activities").await.json::<Catalog>()
}

fn assert_method_not_allowed(response: &TestResponse) {
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.header("content-type"), "application/json");
    assert_eq!(response.json::<ErrorResponse>().detail, "Method Not Allowed");
}

fn signup_path(activity: &str) -> String {
    format!("/activities/{}/signup", activity.replace(' ', "%20"))
}

fn unregister_path(activity: &str) -> String {
    format!("/activities/{}/unregister", activity.replace(' ', "%20"))
}

mod root {
    use super::*;

    #[tokio::test]
    async fn redirects_to_landing_page() {
        let server = setup();

        let response = server.get("/").await;

        response.assert_status(StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.header("location"), INDEX_PATH);
    }

    #[tokio::test]
    async fn unknown_route_returns_json_detail() {
        let server = setup();

        let response = server.get("/clubs").await;

        response.assert_status_not_found();
        assert_eq!(response.header("content-type"), "application/json");
        assert_eq!(response.json::<ErrorResponse>().detail, "Not Found");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = setup();

        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "status": "ok" }));
    }
}

mod list_activities {
    use super::*;

    #[tokio::test]
    async fn returns_every_activity_keyed_by_name() {
        let server = setup();

        let response = server.get("/activities").await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/json");
        let data = response.json::<Catalog>();
        assert_eq!(data.len(), 9);
        for name in ["Chess Club", "Programming Class", "Gym Class"] {
            assert!(data.contains_key(name), "missing {name}");
        }
    }

    #[tokio::test]
    async fn activity_objects_have_expected_shape() {
        let server = setup();

        let data = server.get("/activities").await.json::<serde_json::Value>();

        let chess = &data["Chess Club"];
        assert_eq!(chess["description"], "Learn strategies and compete in chess tournaments");
        assert_eq!(chess["schedule"], "Fridays, 3:30 PM - 5:00 PM");
        assert_eq!(chess["max_participants"], 12);
        assert_eq!(
            chess["participants"],
            serde_json::json!(["michael@mergington.edu", "daniel@mergington.edu"])
        );

        for (_, activity) in data.as_object().unwrap() {
            assert!(activity["max_participants"].as_u64().unwrap() > 0);
            assert!(activity["participants"].is_array());
        }
    }

    #[tokio::test]
    async fn rejects_other_methods() {
        let server = setup();

        let response = server.method(Method::PATCH, "/activities").await;

        assert_method_not_allowed(&response);
    }
}

mod signup {
    use super::*;

    #[tokio::test]
    async fn signs_up_a_new_student() {
        let server = setup();

        let response = server
            .post(&signup_path("Chess Club"))
            .add_query_param("email", "newstudent@mergington.edu")
            .await;

        response.assert_status_ok();
        let body = response.json::<MessageResponse>();
        assert!(body.message.contains("newstudent@mergington.edu"));
        assert!(body.message.contains("Chess Club"));
    }

    #[tokio::test]
    async fn signup_appears_in_activity_list() {
        let server = setup();

        server
            .post(&signup_path("Programming Class"))
            .add_query_param("email", "persistent@mergington.edu")
            .await
            .assert_status_ok();

        let data = activities(&server).await;
        assert!(data["Programming Class"]
            .participants
            .contains(&"persistent@mergington.edu".to_string()));

        for _ in 0..3 {
            let again = activities(&server).await;
            assert_eq!(again["Programming Class"].participants.len(), 3);
        }
    }

    #[tokio::test]
    async fn several_students_can_join_one_activity() {
        let server = setup();
        let emails = ["s1@mergington.edu", "s2@mergington.edu", "s3@mergington.edu"];

        for email in emails {
            server
                .post(&signup_path("Science Club"))
                .add_query_param("email", email)
                .await
                .assert_status_ok();
        }

        let roster = &activities(&server).await["Science Club"].participants;
        for email in emails {
            assert!(roster.contains(&email.to_string()));
        }
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let server = setup();

        let response = server
            .post(&signup_path("Nonexistent Club"))
            .add_query_param("email", "student@mergington.edu")
            .await;

        response.assert_status_not_found();
        assert_eq!(response.header("content-type"), "application/json");
        assert_eq!(
            response.json::<ErrorResponse>(),
            ErrorResponse { detail: "Activity not found".to_string() }
        );
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected() {
        let server = setup();

        server
            .post(&signup_path("Chess Club"))
            .add_query_param("email", "duplicate@mergington.edu")
            .await
            .assert_status_ok();

        let response = server
            .post(&signup_path("Chess Club"))
            .add_query_param("email", "duplicate@mergington.edu")
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<ErrorResponse>().detail, "Student already signed up");
    }

    #[tokio::test]
    async fn keeps_plus_sign_in_email() {
        let server = setup();

        server
            .post(&signup_path("Programming Class"))
            .add_query_param("email", "test+tag@mergington.edu")
            .await
            .assert_status_ok();

        let roster = &activities(&server).await["Programming Class"].participants;
        assert!(roster.contains(&"test+tag@mergington.edu".to_string()));
    }

    #[tokio::test]
    async fn accepts_empty_email() {
        let server = setup();

        server
            .post("/activities/Chess%20Club/signup?email=")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn missing_email_is_unprocessable() {
        let server = setup();

        let response = server.post("/activities/Chess%20Club/signup").await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!response.json::<ErrorResponse>().detail.is_empty());
        assert_eq!(activities(&server).await["Chess Club"].participants.len(), 2);
    }

    #[tokio::test]
    async fn decodes_percent_encoded_names() {
        let server = setup();

        server
            .post("/activities/Chess%20Club/signup?email=test@example.com")
            .await
            .assert_status_ok();

        let roster = &activities(&server).await["Chess Club"].participants;
        assert!(roster.contains(&"test@example.com".to_string()));
    }

    #[tokio::test]
    async fn undecodable_name_returns_json_detail() {
        let server = setup();

        let response = server
            .post("/activities/%FF/signup")
            .add_query_param("email", "a@x.edu")
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.header("content-type"), "application/json");
        assert!(response.json::<ErrorResponse>().detail.contains("UTF-8"));
    }

    #[tokio::test]
    async fn reaches_names_containing_a_slash() {
        let catalog = Catalog::from([(
            "Arts/Crafts".to_string(),
            Activity::new("Make things", "Mondays", 10),
        )]);
        let server = setup_with(RosterStore::new(catalog));

        server
            .post("/activities/Arts%2FCrafts/signup?email=a@x.edu")
            .await
            .assert_status_ok();

        assert_eq!(activities(&server).await["Arts/Crafts"].participants, vec!["a@x.edu"]);
    }

    #[tokio::test]
    async fn rejects_other_methods() {
        let server = setup();

        let response = server
            .put("/activities/Chess%20Club/signup")
            .add_query_param("email", "a@x.edu")
            .await;

        assert_method_not_allowed(&response);
    }

    #[tokio::test]
    async fn can_exceed_capacity_by_default() {
        let server = setup();
        let mathletes = activities(&server).await["Mathletes"].clone();
        let capacity = mathletes.max_participants as usize;
        let one_past_full = capacity - mathletes.participants.len() + 1;

        for n in 0..one_past_full {
            server
                .post(&signup_path("Mathletes"))
                .add_query_param("email", format!("student{n}@mergington.edu"))
                .await
                .assert_status_ok();
        }

        assert_eq!(activities(&server).await["Mathletes"].participants.len(), capacity + 1);
    }

    #[tokio::test]
    async fn full_activity_is_rejected_when_enforced() {
        let catalog = Catalog::from([(
            "Duet".to_string(),
            Activity::new("Two voices", "Fridays", 2).with_participants(["a@x.edu", "b@x.edu"]),
        )]);
        let server = setup_with(RosterStore::with_policy(catalog, CapacityPolicy::Enforced));

        let response = server
            .post("/activities/Duet/signup")
            .add_query_param("email", "c@x.edu")
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<ErrorResponse>().detail, "Activity is full");
    }
}

mod unregister {
    use super::*;

    #[tokio::test]
    async fn removes_a_registered_student() {
        let server = setup();

        let response = server
            .delete(&unregister_path("Chess Club"))
            .add_query_param("email", "michael@mergington.edu")
            .await;

        response.assert_status_ok();
        let body = response.json::<MessageResponse>();
        assert!(body.message.contains("michael@mergington.edu"));
        assert!(body.message.contains("Chess Club"));

        let roster = &activities(&server).await["Chess Club"].participants;
        assert!(!roster.contains(&"michael@mergington.edu".to_string()));
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let server = setup();

        let response = server
            .delete(&unregister_path("Nonexistent Club"))
            .add_query_param("email", "student@mergington.edu")
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<ErrorResponse>().detail, "Activity not found");
    }

    #[tokio::test]
    async fn unregistered_student_is_rejected() {
        let server = setup();

        let response = server
            .delete(&unregister_path("Chess Club"))
            .add_query_param("email", "notregistered@mergington.edu")
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<ErrorResponse>().detail,
            "Student is not registered for this activity"
        );
    }

    #[tokio::test]
    async fn undecodable_name_returns_json_detail() {
        let server = setup();

        let response = server
            .delete("/activities/%FF/unregister")
            .add_query_param("email", "a@x.edu")
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<ErrorResponse>().detail.contains("UTF-8"));
    }

    #[tokio::test]
    async fn missing_email_is_unprocessable() {
        let server = setup();

        let response = server.delete("/activities/Chess%20Club/unregister").await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn rejects_other_methods() {
        let server = setup();

        let response = server
            .post("/activities/Chess%20Club/unregister")
            .add_query_param("email", "michael@mergington.edu")
            .await;

        assert_method_not_allowed(&response);
    }
}

mod workflows {
    use super::*;

    #[tokio::test]
    async fn signup_then_unregister_restores_roster() {
        let server = setup();
        let initial = activities(&server).await["Basketball Club"].participants.clone();

        server
            .post(&signup_path("Basketball Club"))
            .add_query_param("email", "workflow@mergington.edu")
            .await
            .assert_status_ok();
        assert_eq!(
            activities(&server).await["Basketball Club"].participants.len(),
            initial.len() + 1
        );

        server
            .delete(&unregister_path("Basketball Club"))
            .add_query_param("email", "workflow@mergington.edu")
            .await
            .assert_status_ok();
        assert_eq!(activities(&server).await["Basketball Club"].participants, initial);
    }

    #[tokio::test]
    async fn student_can_rejoin_after_leaving() {
        let server = setup();

        for (method, path) in [
            (Method::POST, signup_path("Art Workshop")),
            (Method::DELETE, unregister_path("Art Workshop")),
            (Method::POST, signup_path("Art Workshop")),
        ] {
            server
                .method(method, &path)
                .add_query_param("email", "rejoiner@mergington.edu")
                .await
                .assert_status_ok();
        }

        let roster = &activities(&server).await["Art Workshop"].participants;
        assert!(roster.contains(&"rejoiner@mergington.edu".to_string()));
    }

    #[tokio::test]
    async fn servers_do_not_share_state() {
        let first = setup();
        let second = setup();

        first
            .post(&signup_path("Drama Club"))
            .add_query_param("email", "isolated@mergington.edu")
            .await
            .assert_status_ok();

        let roster = &activities(&second).await["Drama Club"].participants;
        assert!(!roster.contains(&"isolated@mergington.edu".to_string()));
    }
}
