// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Datagram transport used by a session.

use std::io;
use std::net::UdpSocket;
use std::os::unix::net::UnixDatagram;

/// A connected datagram socket.
///
/// `recv` must not block: when nothing is queued it reports
/// [`io::ErrorKind::WouldBlock`].
pub trait Transport {
    /// Send one datagram to the connected peer.
    fn send(&self, buf: &[u8]) -> io::Result<usize>;
    /// Receive one datagram, returning its length.
    fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}

impl Transport for UnixDatagram {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        UnixDatagram::send(self, buf)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        UnixDatagram::recv(self, buf)
    }
}

impl Transport for UdpSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        UdpSocket::send(self, buf)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        UdpSocket::recv(self, buf)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).send(buf)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).recv(buf)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).send(buf)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).recv(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_pair() {
        let (a, b) = UnixDatagram::pair().unwrap();
        b.set_nonblocking(true).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(
            Transport::recv(&b, &mut buf).unwrap_err().kind(),
            io::ErrorKind::WouldBlock
        );
        assert_eq!(Transport::send(&a, b"hello").unwrap(), 5);
        assert_eq!(Transport::recv(&&b, &mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], b"hello");
    }

    #[test]
    fn test_udp_connected() {
        let a = UdpSocket::bind("127.0.0.1:0").unwrap();
        let b = UdpSocket::bind("127.0.0.1:0").unwrap();
        a.connect(b.local_addr().unwrap()).unwrap();
        b.connect(a.local_addr().unwrap()).unwrap();
        let boxed: Box<dyn Transport> = Box::new(a);
        boxed.send(b"ping").unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(Transport::recv(&b, &mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], b"ping");
    }
}
