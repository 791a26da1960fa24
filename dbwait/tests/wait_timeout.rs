use dbwait::{SocketConnection, WaitStatus};

use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

fn tcp_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local address");

    let client = TcpStream::connect(addr).expect("Failed to connect to listener");
    let (server, _) = listener.accept().expect("Failed to accept connection");

    (client, server)
}

#[test]
fn test_nothing_ready_returns_timeout_after_deadline() {
    let (local, _peer) = tcp_pair();
    let conn = SocketConnection::new(&local, 1);

    let start = Instant::now();
    let observed = dbwait::wait(&conn, WaitStatus::READ | WaitStatus::TIMEOUT);
    let elapsed = start.elapsed();

    assert_eq!(observed, WaitStatus::TIMEOUT);
    assert!(
        elapsed >= Duration::from_millis(900),
        "Wait returned after {:?}, before the 1s timeout",
        elapsed
    );
    assert!(
        elapsed < Duration::from_secs(5),
        "Wait took {:?}, far beyond the 1s timeout",
        elapsed
    );
}

#[test]
fn test_zero_timeout_returns_immediately() {
    let (local, _peer) = tcp_pair();
    let conn = SocketConnection::new(&local, 0);

    let start = Instant::now();
    let observed = dbwait::wait(&conn, WaitStatus::READ | WaitStatus::TIMEOUT);

    assert_eq!(observed, WaitStatus::TIMEOUT);
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test]
fn test_except_never_signalled_returns_timeout() {
    let (local, _peer) = tcp_pair();
    let conn = SocketConnection::new(&local, 1);

    let observed = dbwait::wait(&conn, WaitStatus::EXCEPT | WaitStatus::TIMEOUT);

    assert_eq!(observed, WaitStatus::TIMEOUT);
}

#[test]
fn test_without_timeout_flag_blocks_until_ready() {
    let (local, mut peer) = tcp_pair();
    let (tx, rx) = mpsc::channel();

    // The connection timeout is zero but must be ignored without TIMEOUT.
    let handle = thread::spawn(move || {
        let conn = SocketConnection::new(&local, 0);
        let observed = dbwait::wait(&conn, WaitStatus::READ);
        tx.send(observed).expect("Failed to report result");
    });

    assert!(
        rx.recv_timeout(Duration::from_millis(300)).is_err(),
        "Unbounded wait returned while nothing was ready"
    );

    peer.write_all(b"wake").expect("Failed to write to peer");

    let observed = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("Wait did not return after the socket became readable");
    assert_eq!(observed, WaitStatus::READ);

    handle.join().expect("Thread panicked");
}

#[cfg(unix)]
#[test]
fn test_hang_up_without_requested_condition_returns_empty() {
    use std::os::unix::net::UnixStream;

    let (local, peer) = UnixStream::pair().expect("Failed to create socket pair");
    drop(peer);

    let conn = SocketConnection::new(&local, 5);

    let start = Instant::now();
    let observed = dbwait::wait(&conn, WaitStatus::EXCEPT | WaitStatus::TIMEOUT);

    assert_eq!(observed, WaitStatus::empty());
    assert!(
        start.elapsed() < Duration::from_secs(4),
        "A hang-up should end the wait without reaching the deadline"
    );
}

#[cfg(unix)]
#[test]
fn test_invalid_descriptor_returns_timeout() {
    // Far above any descriptor this process has open.
    let conn = unsafe { SocketConnection::from_raw(i32::MAX - 1, 5) };

    let start = Instant::now();
    let observed = dbwait::wait(&conn, WaitStatus::READ | WaitStatus::TIMEOUT);

    assert_eq!(observed, WaitStatus::TIMEOUT);
    assert!(
        start.elapsed() < Duration::from_secs(4),
        "The failure should be reported without waiting for the deadline"
    );
}

#[cfg(windows)]
#[test]
fn test_invalid_descriptor_returns_timeout() {
    let conn = unsafe { SocketConnection::from_raw(u64::MAX, 5) };

    let observed = dbwait::wait(&conn, WaitStatus::READ | WaitStatus::TIMEOUT);

    assert_eq!(observed, WaitStatus::TIMEOUT);
}
