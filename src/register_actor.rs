use crate::errors::RegisterError;
use crate::models::CompanyRef;
use crate::register::VatRegister;
use tokio::sync::{mpsc, oneshot};

pub enum RegisterMessage {
    NewCompany {
        name: String,
        addr: String,
        tax_id: String,
        reply: oneshot::Sender<Result<(), RegisterError>>,
    },
    Cancel {
        company: CompanyRef,
        reply: oneshot::Sender<Result<(), RegisterError>>,
    },
    Invoice {
        company: CompanyRef,
        amount: u32,
        reply: oneshot::Sender<Result<(), RegisterError>>,
    },
    Audit {
        company: CompanyRef,
        reply: oneshot::Sender<Result<u64, RegisterError>>,
    },
    First {
        reply: oneshot::Sender<Option<(String, String)>>,
    },
    Next {
        name: String,
        addr: String,
        reply: oneshot::Sender<Option<(String, String)>>,
    },
    Median {
        reply: oneshot::Sender<u32>,
    },
    Shutdown,
}

/// Sole owner of a register shared between tasks.
///
/// Messages are handled one at a time, so each operation observes and leaves
/// both orderings consistent.
pub struct RegisterActor {
    register: VatRegister,
    receiver: mpsc::Receiver<RegisterMessage>,
}

impl RegisterActor {
    pub fn new(receiver: mpsc::Receiver<RegisterMessage>) -> Self {
        Self {
            register: VatRegister::new(),
            receiver,
        }
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RegisterMessage::NewCompany {
                    name,
                    addr,
                    tax_id,
                    reply,
                } => {
                    let _ = reply.send(self.register.new_company(&name, &addr, &tax_id));
                }
                RegisterMessage::Cancel { company, reply } => {
                    let _ = reply.send(self.register.cancel(&company));
                }
                RegisterMessage::Invoice {
                    company,
                    amount,
                    reply,
                } => {
                    let _ = reply.send(self.register.invoice(&company, amount));
                }
                RegisterMessage::Audit { company, reply } => {
                    let _ = reply.send(self.register.audit(&company));
                }
                RegisterMessage::First { reply } => {
                    let _ = reply.send(self.register.first_company());
                }
                RegisterMessage::Next { name, addr, reply } => {
                    let _ = reply.send(self.register.next_company(&name, &addr));
                }
                RegisterMessage::Median { reply } => {
                    let _ = reply.send(self.register.median_invoice());
                }
                RegisterMessage::Shutdown => break,
            }
        }

        tracing::debug!(
            companies = self.register.len(),
            invoices = self.register.invoice_count(),
            "register actor terminated"
        );
    }
}

#[derive(Clone)]
pub struct RegisterHandle {
    sender: mpsc::Sender<RegisterMessage>,
}

impl RegisterHandle {
    pub fn new(sender: mpsc::Sender<RegisterMessage>) -> Self {
        Self { sender }
    }

    /// Spawns an actor over an empty register and returns its handle.
    ///
    /// `buffer` is the mailbox capacity; zero is raised to one.
    pub fn spawn(buffer: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let actor = RegisterActor::new(rx);

        tokio::spawn(async move {
            actor.run().await;
        });

        Self::new(tx)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> RegisterMessage,
    ) -> Result<T, RegisterError> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.sender
            .send(build(reply_tx))
            .await
            .map_err(|_| RegisterError::ActorCommunication)?;

        reply_rx
            .await
            .map_err(|_| RegisterError::ActorCommunication)
    }

    pub async fn new_company(&self, name: &str, addr: &str, tax_id: &str) -> Result<(), RegisterError> {
        self.request(|reply| RegisterMessage::NewCompany {
            name: name.to_string(),
            addr: addr.to_string(),
            tax_id: tax_id.to_string(),
            reply,
        })
        .await?
    }

    pub async fn cancel(&self, company: CompanyRef) -> Result<(), RegisterError> {
        self.request(|reply| RegisterMessage::Cancel { company, reply })
            .await?
    }

    pub async fn invoice(&self, company: CompanyRef, amount: u32) -> Result<(), RegisterError> {
        self.request(|reply| RegisterMessage::Invoice {
            company,
            amount,
            reply,
        })
        .await?
    }

    pub async fn audit(&self, company: CompanyRef) -> Result<u64, RegisterError> {
        self.request(|reply| RegisterMessage::Audit { company, reply })
            .await?
    }

    pub async fn first_company(&self) -> Result<Option<(String, String)>, RegisterError> {
        self.request(|reply| RegisterMessage::First { reply }).await
    }

    pub async fn next_company(
        &self,
        name: &str,
        addr: &str,
    ) -> Result<Option<(String, String)>, RegisterError> {
        self.request(|reply| RegisterMessage::Next {
            name: name.to_string(),
            addr: addr.to_string(),
            reply,
        })
        .await
    }

    pub async fn median_invoice(&self) -> Result<u32, RegisterError> {
        self.request(|reply| RegisterMessage::Median { reply }).await
    }

    pub async fn shutdown(&self) -> Result<(), RegisterError> {
        self.sender
            .send(RegisterMessage::Shutdown)
            .await
            .map_err(|_| RegisterError::ActorCommunication)
    }
}
