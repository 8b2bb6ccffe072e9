use sms_pdu_decoder::DecodedMessage;
use std::io::prelude::*;

fn main() {
    env_logger::init();
    println!("Input PDUs");
    let stdin = ::std::io::stdin();
    let lock = stdin.lock();
    for ln in lock.lines() {
        let ln = ln.unwrap();
        if ln.trim().is_empty() {
            continue;
        }
        match DecodedMessage::from_hex(&ln) {
            Ok(msg) => {
                println!("PDU: {:?}", msg);
                println!("From/to: {}", msg.address);
                println!("Message: {:?}", msg.text);
                if let Some(warning) = msg.warning {
                    println!("Warning: {}", warning);
                }
            },
            Err(e) => println!("Error: {}", e)
        }
    }
}
