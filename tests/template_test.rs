//! 模板构建与序列化测试
//!
//! 覆盖：
//! - Attachment / Message 的存在性校验
//! - 图表数据校验与整理
//! - 端到端 payload 形状

use slacktastic::template::QUICKCHART_BASE_URL;
use slacktastic::{
    bar_chart, pie_chart, Attachment, Field, Message, Series, TemplateError,
};

// ============================================================================
// 校验
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_attachment_presence_combinations() {
        // (title, text, has_fields, should_succeed)
        let cases = vec![
            (None, None, false, false),
            (Some(""), Some(""), false, false),
            (Some("t"), None, false, true),
            (None, Some("x"), false, true),
            (None, None, true, true),
            (Some(""), None, true, true),
        ];

        for (title, text, has_fields, expected) in cases {
            let mut builder = Attachment::builder().color("danger");
            if let Some(t) = title {
                builder = builder.title(t);
            }
            if let Some(t) = text {
                builder = builder.text(t);
            }
            if has_fields {
                builder = builder.field(Field::new("k", 1));
            }

            let result = builder.build();
            assert_eq!(
                result.is_ok(),
                expected,
                "title={:?} text={:?} fields={}",
                title,
                text,
                has_fields
            );
            if !expected {
                assert_eq!(result.unwrap_err(), TemplateError::InvalidAttachment);
            }
        }
    }

    #[test]
    fn test_message_presence_combinations() {
        let attachment = Attachment::builder().text("x").build().unwrap();

        assert_eq!(
            Message::new(None, vec![]).unwrap_err(),
            TemplateError::InvalidMessage
        );
        assert_eq!(
            Message::new(Some(String::new()), vec![]).unwrap_err(),
            TemplateError::InvalidMessage
        );
        assert!(Message::new(Some("hi".to_string()), vec![]).is_ok());
        assert!(Message::new(None, vec![attachment]).is_ok());
    }

    #[test]
    fn test_bar_chart_validation_and_reshape() {
        let err = bar_chart("T", ["A", "B", "C"], vec![Series::new("x", [1, 2])], None)
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::InvalidChartData(
                "Labels and values not the same size for \"x\"".to_string()
            )
        );

        let chart = bar_chart("T", ["A", "B", "C"], vec![Series::new("x", [1, 2, 3])], None)
            .unwrap();
        let url = chart.image_url().unwrap();
        // {'data': [1, 2, 3], 'label': 'x'}
        assert!(url.contains(
            "%7B%27data%27%3A%20%5B1%2C%202%2C%203%5D%2C%20%27label%27%3A%20%27x%27%7D"
        ));
    }

    #[test]
    fn test_pie_chart_validation() {
        assert!(matches!(
            pie_chart("T", ["a", "b"], [1, 2, 3], None),
            Err(TemplateError::InvalidChartData(_))
        ));
        assert!(pie_chart("T", ["a", "b"], [1, 2], None).is_ok());
    }
}

// ============================================================================
// 序列化
// ============================================================================

mod payload_tests {
    use super::*;

    #[test]
    fn test_field_round_trip() {
        let field = Field::new("Score", 42).with_short(false);
        assert_eq!(
            field.to_payload(),
            serde_json::json!({"title": "Score", "value": 42, "short": false})
        );
    }

    #[test]
    fn test_end_to_end_pie_message() {
        let chart = pie_chart("Votes", ["Yes", "No"], [7, 3], None).unwrap();
        let message = Message::builder().text("hi").attachment(chart).build().unwrap();
        let payload = message.to_payload();

        assert_eq!(payload["text"], "hi");
        let attachment = &payload["attachments"][0];
        assert_eq!(attachment["title"], "Votes");
        assert!(attachment["image_url"]
            .as_str()
            .unwrap()
            .starts_with("https://quickchart.io/chart?c="));
        assert_eq!(attachment["image_url"], attachment["thumb_url"]);
        assert_eq!(attachment["type"], "mrkdwn");
        assert!(attachment["fields"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_attachment_order_preserved() {
        let titles = ["zeta", "alpha", "mid"];
        let attachments = titles
            .iter()
            .map(|t| Attachment::builder().title(*t).build().unwrap())
            .collect();
        let message = Message::new(None, attachments).unwrap();

        let payload = message.to_payload();
        let got: Vec<&str> = payload["attachments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(got, titles);
    }

    #[test]
    fn test_chart_urls_identical_for_identical_input() {
        let a = pie_chart("T", ["a", "b"], [1.5, 2.5], Some("good")).unwrap();
        let b = pie_chart("T", ["a", "b"], [1.5, 2.5], Some("good")).unwrap();
        assert_eq!(a.image_url(), b.image_url());
        assert!(a.image_url().unwrap().starts_with(QUICKCHART_BASE_URL));
    }

    #[test]
    fn test_rich_attachment_payload() {
        let attachment = Attachment::builder()
            .title("Deploy")
            .title_link("https://example.com/deploys/42")
            .pretext("New release")
            .text("*v1.2.0* is live")
            .footer("ci")
            .footer_icon("https://example.com/icon.png")
            .color("#36a64f")
            .field(Field::new("Env", "prod"))
            .field(Field::new("Healthy", true).with_short(false))
            .build()
            .unwrap();

        let payload = attachment.to_payload();
        assert_eq!(payload["title_link"], "https://example.com/deploys/42");
        assert_eq!(payload["pretext"], "New release");
        assert_eq!(payload["footer"], "ci");
        assert_eq!(payload["footer_icon"], "https://example.com/icon.png");
        assert_eq!(payload["color"], "#36a64f");
        assert!(payload["image_url"].is_null());
        assert_eq!(payload["fields"][1]["value"], true);
        assert_eq!(payload["fields"][1]["short"], false);
    }
}
