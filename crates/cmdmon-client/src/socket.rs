// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Opening a connected socket to the daemon.
//!
//! A Unix domain client socket has to be bound to a path the daemon can send
//! to, and the daemon usually runs as another user. The socket is therefore
//! created inside two freshly made, randomly named directories next to the
//! server socket. Permissions are widened only after the socket is bound, and
//! the outer directory is checked through an open descriptor, so that a
//! hostile owner of the parent directory cannot redirect the `chmod` calls
//! through a symlink.
//!
//! UDP sockets need none of this.

// libc calls for directory-relative creation and the effective uid.
#![allow(unsafe_code)]

use std::ffi::{CString, OsStr};
use std::fs::{self, DirBuilder, File, OpenOptions, Permissions};
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, RawFd};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{DirBuilderExt, MetadataExt, OpenOptionsExt, PermissionsExt};
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use socket2::{Domain, Protocol, Socket, Type};

use crate::config::{CLIENT_DIR_PREFIX, SocketTarget};
use crate::entropy::{Entropy, OsEntropy, random_alphanumeric};
use crate::transport::Transport;

/// Capacity of `sockaddr_un.sun_path`, including the terminating NUL.
const SUN_PATH_LEN: usize = 108;

/// Length of the outer directory's random suffix.
const OUTER_NAME_LEN: usize = 12;
/// Length of the inner directory's name.
const INNER_NAME_LEN: usize = 16;
/// File name of the bound client socket.
const SOCKET_NAME: &str = "sock";

/// Mode of both private directories.
const DIR_MODE: u32 = 0o711;
/// Mode of the bound socket once it is safe to open it up.
const SOCKET_MODE: u32 = 0o666;

/// A non-blocking datagram socket connected to the daemon.
///
/// Dropping a Unix domain socket removes its bound path and the two
/// directories created for it.
#[derive(Debug)]
pub struct ControlSocket {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Unix(UnixDatagram),
    Inet(UdpSocket),
}

impl ControlSocket {
    /// Connect to `target`, drawing directory names from the OS random
    /// source.
    pub fn connect(target: &SocketTarget) -> io::Result<ControlSocket> {
        ControlSocket::connect_with(target, &mut OsEntropy)
    }

    /// Connect to `target` with a caller-supplied random source.
    pub fn connect_with<E: Entropy + ?Sized>(
        target: &SocketTarget,
        entropy: &mut E,
    ) -> io::Result<ControlSocket> {
        let inner = match target {
            SocketTarget::Unix(path) => Inner::Unix(open_unix(path, entropy)?),
            SocketTarget::Inet(addr) => Inner::Inet(open_inet(*addr)?),
        };
        Ok(ControlSocket { inner })
    }

    /// Path the client socket is bound to, for Unix domain sockets.
    pub fn local_path(&self) -> Option<PathBuf> {
        match &self.inner {
            Inner::Unix(sock) => sock
                .local_addr()
                .ok()
                .and_then(|addr| addr.as_pathname().map(Path::to_path_buf)),
            Inner::Inet(_) => None,
        }
    }

    /// Returns `true` for a Unix domain socket.
    pub fn is_unix(&self) -> bool {
        matches!(self.inner, Inner::Unix(_))
    }
}

impl Transport for ControlSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        match &self.inner {
            Inner::Unix(sock) => sock.send(buf),
            Inner::Inet(sock) => sock.send(buf),
        }
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        match &self.inner {
            Inner::Unix(sock) => sock.recv(buf),
            Inner::Inet(sock) => sock.recv(buf),
        }
    }
}

impl AsFd for ControlSocket {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match &self.inner {
            Inner::Unix(sock) => sock.as_fd(),
            Inner::Inet(sock) => sock.as_fd(),
        }
    }
}

impl AsRawFd for ControlSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.as_fd().as_raw_fd()
    }
}

impl Drop for ControlSocket {
    fn drop(&mut self) {
        if let Inner::Unix(sock) = &self.inner {
            remove_bound_path(sock);
        }
    }
}

/// Open a socket to the daemon.
///
/// `None` or an empty string tries the local socket, then IPv4 loopback,
/// then IPv6 loopback, and returns the last error if none works. Otherwise
/// the address is parsed as a [`SocketTarget`].
pub fn open_socket(address: Option<&str>) -> io::Result<ControlSocket> {
    open_socket_with(address, &mut OsEntropy)
}

/// [`open_socket`] with a caller-supplied random source.
pub fn open_socket_with<E: Entropy + ?Sized>(
    address: Option<&str>,
    entropy: &mut E,
) -> io::Result<ControlSocket> {
    match address.filter(|a| !a.is_empty()) {
        Some(address) => ControlSocket::connect_with(&address.parse()?, entropy),
        None => {
            let mut last_err = None;
            for target in SocketTarget::defaults() {
                match ControlSocket::connect_with(&target, entropy) {
                    Ok(sock) => return Ok(sock),
                    Err(e) => {
                        debug!("cannot open {target}: {e}");
                        last_err = Some(e);
                    }
                }
            }
            Err(last_err
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no server address")))
        }
    }
}

fn open_inet(addr: SocketAddr) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
    socket.connect(&addr.into())?;
    socket.set_nonblocking(true)?;
    Ok(socket.into())
}

fn check_path_len(path: &Path) -> io::Result<()> {
    if path.as_os_str().len() >= SUN_PATH_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("socket path too long: {}", path.display()),
        ));
    }
    Ok(())
}

/// Everything up to the last `/`, which must not be the leading one.
fn parent_dir(path: &Path) -> io::Result<&Path> {
    let bytes = path.as_os_str().as_bytes();
    match bytes.iter().rposition(|&b| b == b'/') {
        Some(idx) if idx > 0 => Ok(Path::new(OsStr::from_bytes(&bytes[..idx]))),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("socket path has no parent directory: {}", path.display()),
        )),
    }
}

/// Filesystem state created during a Unix socket bootstrap, removed in
/// reverse order unless the bootstrap completes.
#[derive(Default)]
struct Created {
    outer: Option<PathBuf>,
    inner: Option<PathBuf>,
    socket: Option<PathBuf>,
}

impl Created {
    fn keep(&mut self) {
        self.socket = None;
        self.inner = None;
        self.outer = None;
    }
}

impl Drop for Created {
    fn drop(&mut self) {
        if let Some(path) = &self.socket {
            if let Err(e) = fs::remove_file(path) {
                warn!("cannot remove {}: {e}", path.display());
            }
        }
        for dir in [&self.inner, &self.outer].into_iter().flatten() {
            if let Err(e) = fs::remove_dir(dir) {
                warn!("cannot remove {}: {e}", dir.display());
            }
        }
    }
}

fn open_unix<E: Entropy + ?Sized>(server: &Path, entropy: &mut E) -> io::Result<UnixDatagram> {
    open_unix_checked(server, entropy, verify_private_dir)
}

/// Unix bootstrap with the outer directory check supplied by the caller.
fn open_unix_checked<E, V>(server: &Path, entropy: &mut E, verify: V) -> io::Result<UnixDatagram>
where
    E: Entropy + ?Sized,
    V: FnOnce(&File) -> io::Result<()>,
{
    check_path_len(server)?;

    // Fail early, before touching the filesystem, if nobody listens.
    UnixDatagram::unbound()?.connect(server)?;

    let base = parent_dir(server)?;
    let outer_name = format!(
        "{CLIENT_DIR_PREFIX}{}",
        random_alphanumeric(entropy, OUTER_NAME_LEN)?
    );
    let inner_name = random_alphanumeric(entropy, INNER_NAME_LEN)?;
    let outer = base.join(&outer_name);
    let inner = outer.join(&inner_name);
    let sock_path = inner.join(SOCKET_NAME);
    check_path_len(&sock_path)?;

    let mut created = Created::default();

    DirBuilder::new().mode(DIR_MODE).create(&outer)?;
    created.outer = Some(outer.clone());

    let outer_dir = open_dir_nofollow(&outer)?;
    verify(&outer_dir)?;

    mkdir_in(&outer_dir, &inner_name, DIR_MODE)?;
    created.inner = Some(inner.clone());

    let sock = UnixDatagram::bind(&sock_path)?;
    created.socket = Some(sock_path.clone());

    fs::set_permissions(&sock_path, Permissions::from_mode(SOCKET_MODE))?;
    fs::set_permissions(&inner, Permissions::from_mode(DIR_MODE))?;
    outer_dir.set_permissions(Permissions::from_mode(DIR_MODE))?;

    sock.connect(server)?;
    sock.set_nonblocking(true)?;

    created.keep();
    debug!("bound {} for {}", sock_path.display(), server.display());
    Ok(sock)
}

/// Open a directory by descriptor, refusing symlinks and other file types.
fn open_dir_nofollow(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NOFOLLOW | libc::O_DIRECTORY)
        .open(path)
}

/// The directory must be ours and no more permissive than intended.
fn verify_private_dir(dir: &File) -> io::Result<()> {
    let meta = dir.metadata()?;
    let euid = unsafe { libc::geteuid() };
    if !meta.is_dir() || meta.mode() & 0o777 & !DIR_MODE != 0 || meta.uid() != euid {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "client socket directory has unexpected type, mode or owner",
        ));
    }
    Ok(())
}

fn mkdir_in(dir: &File, name: &str, mode: u32) -> io::Result<()> {
    let name = CString::new(name).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let ret = unsafe { libc::mkdirat(dir.as_raw_fd(), name.as_ptr(), mode as libc::mode_t) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Remove the socket's bound path and its two enclosing directories,
/// stopping at the first failure.
fn remove_bound_path(sock: &UnixDatagram) {
    let Ok(addr) = sock.local_addr() else {
        return;
    };
    let Some(path) = addr.as_pathname() else {
        return;
    };

    if let Err(e) = fs::remove_file(path) {
        warn!("cannot remove {}: {e}", path.display());
        return;
    }
    for dir in path.ancestors().skip(1).take(2) {
        if let Err(e) = fs::remove_dir(dir) {
            warn!("cannot remove {}: {e}", dir.display());
            return;
        }
    }
}
