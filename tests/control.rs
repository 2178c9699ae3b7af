use mqttpack::{
    Ack, Connect, ControlType, Disconnect, Encode, Error, FixedHeader, PingReq, Publish, QoS,
    Request, Subscribe, Subscription, Unsubscribe, Violation, signed_size,
};

mod common;
use common::frame;

#[test]
fn test_ack_family_bytes() {
    let cases = [
        (Ack::puback(0x0102), [0x40u8, 0x02, 0x01, 0x02]),
        (Ack::pubrec(0x0102), [0x50, 0x02, 0x01, 0x02]),
        (Ack::pubrel(0x0102), [0x62, 0x02, 0x01, 0x02]),
        (Ack::pubcomp(0x0102), [0x70, 0x02, 0x01, 0x02]),
    ];
    for (ack, expected) in cases {
        let mut buf = [0u8; 4];
        assert_eq!(ack.encode(&mut buf), Ok(4));
        assert_eq!(buf, expected);
        assert_eq!(frame(&buf).remaining_length, 2);
    }
}

#[test]
fn test_ack_rejects_other_types() {
    let others = [
        ControlType::Connect,
        ControlType::ConnAck,
        ControlType::Publish,
        ControlType::Subscribe,
        ControlType::SubAck,
        ControlType::Unsubscribe,
        ControlType::UnsubAck,
        ControlType::PingReq,
        ControlType::PingResp,
        ControlType::Disconnect,
    ];
    for control_type in others {
        let mut buf = [0u8; 4];
        assert_eq!(
            Ack::new(control_type, 1).encode(&mut buf),
            Err(Error::ProtocolViolation(Violation::InvalidControlType)),
            "{:?}",
            control_type
        );
        assert_eq!(buf, [0; 4]);
    }
}

#[test]
fn test_ack_short_buffer() {
    let mut buf = [0u8; 3];
    assert_eq!(Ack::puback(1).encode(&mut buf), Err(Error::BufferTooSmall));
    assert_eq!(buf, [0; 3]);
}

#[test]
fn test_ping_and_disconnect() {
    let mut buf = [0u8; 8];
    assert_eq!(PingReq.encode(&mut buf), Ok(2));
    assert_eq!(&buf[..2], &[0xC0, 0x00]);
    assert_eq!(Disconnect.encode(&mut buf), Ok(2));
    assert_eq!(&buf[..2], &[0xE0, 0x00]);

    let mut one = [0u8; 1];
    assert_eq!(PingReq.encode(&mut one), Err(Error::BufferTooSmall));
    assert_eq!(Disconnect.encode(&mut one), Err(Error::BufferTooSmall));
    assert_eq!(PingReq.encode(&mut []), Err(Error::BufferTooSmall));
}

#[test]
fn test_signed_size_contract() {
    let mut buf = [0u8; 4];
    assert_eq!(signed_size(Ack::pubrel(9).encode(&mut buf)), 4);
    assert_eq!(signed_size(Ack::pubrel(9).encode(&mut buf[..3])), 0);
    assert_eq!(
        signed_size(Ack::new(ControlType::Connect, 9).encode(&mut buf)),
        -(Violation::InvalidControlType.code() as isize)
    );
}

#[test]
fn test_request_matches_direct_encoding() {
    let topics = [Subscription::new("s/#", QoS::AtLeastOnce)];
    let filters = ["s/#"];
    let requests = [
        Request::from(Connect::new("id").with_keep_alive(5)),
        Request::from(Publish::new("p", b"m").with_qos(QoS::ExactlyOnce, 4)),
        Request::from(Ack::pubcomp(4)),
        Request::from(Subscribe::new(5, &topics)),
        Request::from(Unsubscribe::new(6, &filters)),
        Request::from(PingReq),
        Request::from(Disconnect),
    ];
    let expected_types = [1u8, 3, 7, 8, 10, 12, 14];

    for (request, packet_type) in requests.iter().zip(expected_types) {
        let mut via_request = [0u8; 64];
        let mut direct = [0u8; 64];
        let n = request.encode(&mut via_request).unwrap();
        let m = match request {
            Request::Connect(p) => p.encode(&mut direct),
            Request::Publish(p) => p.encode(&mut direct),
            Request::Ack(p) => p.encode(&mut direct),
            Request::Subscribe(p) => p.encode(&mut direct),
            Request::Unsubscribe(p) => p.encode(&mut direct),
            Request::PingReq => PingReq.encode(&mut direct),
            Request::Disconnect => Disconnect.encode(&mut direct),
        }
        .unwrap();
        assert_eq!(n, m);
        assert_eq!(via_request, direct);
        assert_eq!(frame(&via_request[..n]).packet_type(), packet_type);
        assert_eq!(request.encoded_len(), Ok(n));
    }
}

#[test]
fn test_fixed_header_direct() {
    let header = FixedHeader::new(ControlType::Publish, 0x0B).unwrap();
    let mut buf = [0u8; 200];
    assert_eq!(header.encode(&mut buf, 150), Ok(3));
    assert_eq!(&buf[..3], &[0x3B, 0x96, 0x01]);
    assert_eq!(header.packet_len(150), Ok(153));
    assert_eq!(header.encode(&mut buf[..152], 150), Err(Error::BufferTooSmall));
}
