use crate::models::{CommandOutput, CommandRow};
use csv_async::{AsyncReaderBuilder, AsyncWriterBuilder};
use futures::stream::Stream;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};

/// Stream register commands from async reader
pub fn stream_commands<R: AsyncRead + Unpin + Send + 'static>(
    reader: R,
) -> impl Stream<Item = Result<CommandRow, csv_async::Error>> {
    let compat_reader = reader.compat();
    let csv_reader = AsyncReaderBuilder::new()
        .trim(csv_async::Trim::All)
        .flexible(true)
        .create_deserializer(compat_reader);

    csv_reader.into_deserialize::<CommandRow>()
}

pub async fn write_results<W: AsyncWrite + Unpin>(
    mut writer: W,
    results: Vec<CommandOutput>,
) -> Result<(), anyhow::Error> {
    // Header is written up front so an empty run still yields it
    writer.write_all(b"seq,op,ok,name,addr,value\n").await?;

    let mut serializer = AsyncWriterBuilder::new()
        .has_headers(false)
        .create_serializer((&mut writer).compat_write());

    for result in results {
        serializer.serialize(&result).await?;
    }

    serializer.flush().await?;
    drop(serializer);

    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommandType;
    use futures::StreamExt;

    #[tokio::test]
    async fn parses_rows_with_blank_fields() {
        let script = "op,name,addr,tax_id,amount\n\
                      new, ACME ,Kolejni,666/666,\n\
                      invoice,,,666/666,2000\n\
                      median,,,,\n";
        let rows: Vec<_> = stream_commands(std::io::Cursor::new(script.as_bytes().to_vec()))
            .collect()
            .await;

        assert_eq!(rows.len(), 3);
        let new = rows[0].as_ref().unwrap();
        assert_eq!(new.op, CommandType::New);
        assert_eq!(new.name, "ACME");
        assert_eq!(new.amount, None);

        let invoice = rows[1].as_ref().unwrap();
        assert_eq!(invoice.tax_id, "666/666");
        assert_eq!(invoice.amount, Some(2000));
    }

    #[tokio::test]
    async fn unknown_operation_is_a_row_error() {
        let script = "op,name,addr,tax_id,amount\nrename,A,B,1,\n";
        let rows: Vec<_> = stream_commands(std::io::Cursor::new(script.as_bytes().to_vec()))
            .collect()
            .await;

        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_err());
    }

    #[tokio::test]
    async fn writes_header_and_rows() {
        let mut out = Vec::new();
        write_results(
            &mut out,
            vec![
                CommandOutput::status(1, CommandType::New, true),
                CommandOutput::status(2, CommandType::First, true)
                    .with_company("ACME".into(), "Kolejni".into()),
                CommandOutput::status(3, CommandType::Median, true).with_value(2000),
            ],
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "seq,op,ok,name,addr,value\n\
             1,new,true,,,\n\
             2,first,true,ACME,Kolejni,\n\
             3,median,true,,,2000\n"
        );
    }

    #[tokio::test]
    async fn quotes_names_with_separators() {
        let mut out = Vec::new();
        write_results(
            &mut out,
            vec![CommandOutput::status(1, CommandType::Next, true)
                .with_company("ACME, \"Inc\"".into(), "Kolejni".into())],
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "seq,op,ok,name,addr,value\n\
             1,next,true,\"ACME, \"\"Inc\"\"\",Kolejni,\n"
        );

        // Reading the report back keeps the name in one column
        let mut reader = csv_async::AsyncReader::from_reader(text.as_bytes());
        let mut record = csv_async::StringRecord::new();
        assert!(reader.read_record(&mut record).await.unwrap());
        assert_eq!(record.len(), 6);
        assert_eq!(&record[3], "ACME, \"Inc\"");
    }
}
