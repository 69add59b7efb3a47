//! End-to-end flow: host channel → request observer → listeners.

#![allow(clippy::panic)]

use std::cell::RefCell;
use std::rc::Rc;

use httpmonitor::app::HttpMonitor;
use httpmonitor::config::MonitorConfig;
use httpmonitor::domain::{HTTP_EVENT, HttpChannel, HttpTopic, HttpTransaction, NotificationSubject};
use httpmonitor::error::MonitorError;
use httpmonitor::net::{HttpObserver, HttpRequestObserver, LocalNotificationService, NotificationService};

#[derive(Debug)]
struct Listener {
    name: &'static str,
    fail: bool,
    calls: Rc<RefCell<Vec<(&'static str, HttpTopic, String)>>>,
}

impl HttpObserver for Listener {
    fn dispatch_name(&self) -> &str {
        self.name
    }

    fn observe(
        &self,
        channel: &dyn HttpChannel,
        topic: HttpTopic,
        _data: Option<&str>,
    ) -> anyhow::Result<()> {
        self.calls
            .borrow_mut()
            .push((self.name, topic, channel.url().to_string()));
        if self.fail {
            anyhow::bail!("boom");
        }
        Ok(())
    }
}

type Calls = Rc<RefCell<Vec<(&'static str, HttpTopic, String)>>>;

fn listener(name: &'static str, fail: bool, calls: &Calls) -> Rc<dyn HttpObserver> {
    Rc::new(Listener {
        name,
        fail,
        calls: Rc::clone(calls),
    })
}

fn host() -> (Rc<LocalNotificationService>, Rc<HttpRequestObserver>) {
    let service = Rc::new(LocalNotificationService::new());
    let dyn_service: Rc<dyn NotificationService> = Rc::<LocalNotificationService>::clone(&service);
    let observer = HttpRequestObserver::new(dyn_service, 50);
    (service, observer)
}

#[test]
fn failing_listener_does_not_hide_event_from_others() {
    let (service, http) = host();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    assert!(http.add_observer(listener("A", false, &calls), HTTP_EVENT).is_ok());
    assert!(http.add_observer(listener("B", true, &calls), HTTP_EVENT).is_ok());

    let tx = HttpTransaction::new("GET", "https://example.com/index.html");
    let delivered = service.notify_observers(&tx, "http-on-modify-request", None);

    assert_eq!(delivered, 1, "exactly one host-level subscription");
    let names: Vec<&str> = calls.borrow().iter().map(|(name, _, _)| *name).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert!(http.is_observing());
}

#[test]
fn wrong_topic_leaves_everything_untouched() {
    let (service, http) = host();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));

    let result = http.add_observer(listener("A", false, &calls), "wrong-topic");
    let Err(err) = result else {
        panic!("wrong topic must be rejected");
    };
    assert!(matches!(err, MonitorError::InvalidArgument { .. }));
    assert_eq!(http.observer_count(), 0);
    assert!(!http.is_observing());
    assert_eq!(service.observer_count("http-on-modify-request"), 0);
}

#[derive(Debug)]
struct DocumentSubject;

impl NotificationSubject for DocumentSubject {}

#[test]
fn non_http_subjects_and_topics_are_ignored() {
    let (service, http) = host();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    assert!(http.add_observer(listener("A", false, &calls), HTTP_EVENT).is_ok());

    service.notify_observers(&DocumentSubject, "http-on-examine-response", None);
    let tx = HttpTransaction::new("GET", "https://example.com/");
    service.notify_observers(&tx, "document-element-inserted", None);

    assert!(calls.borrow().is_empty());
}

#[test]
fn every_topic_reaches_listeners_in_order() {
    let (service, http) = host();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second", "third"] {
        assert!(http.add_observer(listener(name, false, &calls), HTTP_EVENT).is_ok());
    }

    let tx = HttpTransaction::new("GET", "https://example.com/app.js");
    for topic in HttpTopic::ALL {
        service.notify_observers(&tx, topic.as_str(), None);
    }

    let seen: Vec<(&str, HttpTopic)> = calls.borrow().iter().map(|(n, t, _)| (*n, *t)).collect();
    let expected: Vec<(&str, HttpTopic)> = HttpTopic::ALL
        .into_iter()
        .flat_map(|t| [("first", t), ("second", t), ("third", t)])
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn subscription_state_tracks_membership() {
    let (service, http) = host();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let a = listener("A", false, &calls);
    let b = listener("B", false, &calls);

    let steps: Vec<(bool, &Rc<dyn HttpObserver>)> =
        vec![(true, &a), (true, &b), (true, &a), (false, &a), (false, &a), (false, &b)];
    for (add, who) in steps {
        let result = if add {
            http.add_observer(Rc::clone(who), HTTP_EVENT)
        } else {
            http.remove_observer(who, HTTP_EVENT)
        };
        assert!(result.is_ok());
        assert_eq!(http.is_observing(), http.observer_count() > 0);
        let expected = usize::from(http.observer_count() > 0);
        assert_eq!(service.observer_count("http-on-examine-response"), expected);
    }
}

#[test]
fn app_session_records_replayed_traffic() {
    let service = Rc::new(LocalNotificationService::new());
    let host: Rc<dyn NotificationService> = Rc::<LocalNotificationService>::clone(&service);
    let mut app = HttpMonitor::new(&MonitorConfig::default(), host);
    assert!(app.initialize().is_ok());

    let input = concat!(
        "{\"topic\":\"http-on-modify-request\",\"url\":\"https://example.com/a\"}\n",
        "{\"topic\":\"http-on-examine-response\",\"url\":\"https://example.com/a\",\"status\":200}\n",
        "{\"topic\":\"http-on-opening-request\",\"url\":\"https://example.com/b\"}\n",
    );
    let Ok(summary) = httpmonitor::replay::replay(input.as_bytes(), &service) else {
        panic!("replay should succeed");
    };
    assert_eq!(summary.records, 3);
    assert_eq!(summary.notifications, 2);
    assert_eq!(app.traffic_log().len(), 2);

    let ctx = httpmonitor::domain::MonitorContext::new("https://example.com/");
    assert!(app.registry().get_object_by_url(&ctx, "https://example.com/a").is_some());
    assert!(app.registry().get_object_by_url(&ctx, "https://example.com/b").is_none());

    assert!(app.destroy().is_ok());
    assert!(!app.request_observer().is_observing());
}
