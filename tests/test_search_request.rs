use ssdp_client::protocol::{MAX_DATAGRAM_SIZE, MULTICAST_ADDRESS, SSDP_PORT};
use ssdp_client::{DiscoveryConfig, SearchRequest, parse_response};

#[test]
/// M-SEARCH layout: request line, five headers in fixed order, blank terminator
fn test_search_request_wire_layout() {
    let config = DiscoveryConfig::default()
        .with_user_agent("StockGameClient")
        .with_service_type("ssdp:Robby-Harguntas-Stock-Server");
    let request = SearchRequest::build(&config);
    let bytes = request.as_bytes();

    let expected = b"M-SEARCH * HTTP/1.1\r\n\
HOST: 239.255.255.250:1900\r\n\
MAN: \"ssdp:discover\"\r\n\
ST: ssdp:Robby-Harguntas-Stock-Server\r\n\
MX:5\r\n\
USER-AGENT: StockGameClient\r\n\
\r\n";
    assert_eq!(bytes, &expected[..]);

    let crlf_count = bytes.windows(2).filter(|w| *w == b"\r\n").count();
    assert_eq!(crlf_count, 7);
}

#[test]
fn test_protocol_constants() {
    assert_eq!(MULTICAST_ADDRESS.to_string(), "239.255.255.250");
    assert_eq!(SSDP_PORT, 1900);
    assert_eq!(MAX_DATAGRAM_SIZE, 65507);
}

#[test]
fn test_parse_header_count_matches_colon_lines() {
    let raw = "HTTP/1.1 200 OK\r\nA: 1\r\nB: 2\r\nmalformed\r\nC: 3\r\nD: 4";
    let lines = raw.split("\r\n").count();
    let with_colon = raw.split("\r\n").filter(|l| l.contains(':')).count();

    let ad = parse_response(raw.as_bytes());
    assert_eq!(lines, 6);
    assert_eq!(ad.len(), with_colon);
}

#[test]
fn test_usn_left_for_caller_to_interpret() {
    let ad = parse_response(b"USN: name:Stock Server::uuid:42\r\nLOCATION: http://192.168.1.20:8000\r\n");
    assert_eq!(ad.usn(), Some("name:Stock Server::uuid:42"));
    assert_eq!(ad.location(), Some("http://192.168.1.20:8000"));
}
